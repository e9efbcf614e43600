use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::{RefundEvent, TerminateServiceEvent},
    processor,
    state::{RegistryWallet, ServiceAccount, ServiceRegistry},
    treasury::WalletTreasury,
};

#[derive(Accounts)]
pub struct Terminate<'info> {
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

    #[account(mut)]
    pub service_owner: Signer<'info>,

    pub user: Signer<'info>,
}

pub fn terminate_handler(ctx: Context<Terminate>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let mut treasury = WalletTreasury::outbound(
        accounts.registry_wallet.to_account_info(),
        accounts.service_owner.to_account_info(),
    );
    let refund = processor::terminate(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.user.key,
        accounts.service_owner.key,
        &mut treasury,
    )?;
    treasury.reconcile(&accounts.registry.ledger)?;

    let service_id = accounts.service.service_id;
    msg!("Service {} terminated, refund {}", service_id, refund);
    if refund > 0 {
        emit!(RefundEvent {
            receiver: accounts.service_owner.key(),
            amount: refund,
        });
    }
    emit!(TerminateServiceEvent { service_id });
    Ok(())
}
