use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::DrainEvent,
    processor,
    state::{RegistryWallet, ServiceRegistry},
    treasury::WalletTreasury,
};

#[derive(Accounts)]
pub struct Drain<'info> {
    #[account(mut)]
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        mut,
        seeds = [REGISTRY_WALLET_SEED, registry.key().as_ref()],
        bump = registry.wallet_bump,
        has_one = registry,
    )]
    pub registry_wallet: Account<'info, RegistryWallet>,

    #[account(mut)]
    pub drainer: Signer<'info>,
}

pub fn drain_handler(ctx: Context<Drain>) -> Result<u64> {
    let accounts = &mut *ctx.accounts;
    let mut treasury = WalletTreasury::outbound(
        accounts.registry_wallet.to_account_info(),
        accounts.drainer.to_account_info(),
    );
    let amount = processor::drain(&mut accounts.registry, accounts.drainer.key, &mut treasury)?;
    treasury.reconcile(&accounts.registry.ledger)?;

    if amount > 0 {
        msg!("Drained {} slashed lamports", amount);
        emit!(DrainEvent {
            drainer: accounts.drainer.key(),
            amount,
        });
    }
    Ok(amount)
}
