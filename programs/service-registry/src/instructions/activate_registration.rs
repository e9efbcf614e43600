use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::{ActivateRegistrationEvent, DepositEvent},
    processor,
    state::{RegistryWallet, ServiceAccount, ServiceRegistry},
    treasury::WalletTreasury,
};

#[derive(Accounts)]
pub struct ActivateRegistration<'info> {
    #[account(mut)]
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        mut,
        seeds = [SERVICE_SEED, registry.key().as_ref(), &service.service_id.to_le_bytes()[..]],
        bump = service.bump,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(
        mut,
        seeds = [REGISTRY_WALLET_SEED, registry.key().as_ref()],
        bump = registry.wallet_bump,
        has_one = registry,
    )]
    pub registry_wallet: Account<'info, RegistryWallet>,

    pub service_owner: Signer<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn activate_registration_handler(ctx: Context<ActivateRegistration>, deposit: u64) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let mut treasury = WalletTreasury::inbound(
        accounts.registry_wallet.to_account_info(),
        accounts.user.to_account_info(),
        accounts.system_program.to_account_info(),
    );
    processor::activate_registration(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.user.key,
        accounts.service_owner.key,
        deposit,
        &mut treasury,
    )?;
    treasury.reconcile(&accounts.registry.ledger)?;

    let service_id = accounts.service.service_id;
    msg!("Service {} open for registration, deposit {}", service_id, deposit);
    emit!(DepositEvent {
        sender: accounts.user.key(),
        amount: deposit,
    });
    emit!(ActivateRegistrationEvent { service_id });
    Ok(())
}
