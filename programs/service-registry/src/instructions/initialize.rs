use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::ErrorCode,
    ledger::DepositPolicy,
    pda::registry_wallet_pda,
    state::{RegistryWallet, ServiceRegistry},
};

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(init, payer = user, space = ServiceRegistry::LEN)]
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        init,
        payer = user,
        space = RegistryWallet::LEN,
        seeds = [REGISTRY_WALLET_SEED, registry.key().as_ref()],
        bump
    )]
    pub registry_wallet: Account<'info, RegistryWallet>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_handler(
    ctx: Context<Initialize>,
    manager: Pubkey,
    drainer: Pubkey,
    agent_registry: Option<Pubkey>,
    deposit_policy: DepositPolicy,
) -> Result<()> {
    require_keys_neq!(manager, Pubkey::default(), ErrorCode::ZeroAddress);
    require_keys_neq!(drainer, Pubkey::default(), ErrorCode::ZeroAddress);
    if let Some(program_id) = agent_registry {
        require_keys_neq!(program_id, Pubkey::default(), ErrorCode::ZeroAddress);
    }

    let registry_key = ctx.accounts.registry.key();
    let (wallet_key, wallet_bump) = registry_wallet_pda(&registry_key, ctx.program_id);
    let wallet = &mut ctx.accounts.registry_wallet;
    require_keys_eq!(
        wallet.key(),
        wallet_key,
        anchor_lang::error::ErrorCode::ConstraintSeeds
    );
    wallet.registry = registry_key;
    wallet.bump = wallet_bump;

    let registry = &mut ctx.accounts.registry;
    registry.owner = ctx.accounts.user.key();
    registry.manager = manager;
    registry.drainer = drainer;
    registry.agent_registry = agent_registry;
    registry.deposit_policy = deposit_policy;
    registry.wallet_key = wallet_key;
    registry.wallet_bump = wallet.bump;

    msg!(
        "Registry {} initialized, wallet {}, owner {}",
        registry_key,
        registry.wallet_key,
        registry.owner
    );
    Ok(())
}
