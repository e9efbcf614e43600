use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::{OperatorUnbondEvent, RefundEvent},
    processor,
    state::{RegistryWallet, ServiceAccount, ServiceRegistry},
    treasury::WalletTreasury,
};

#[derive(Accounts)]
pub struct Unbond<'info> {
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
    pub operator: Signer<'info>,

    pub user: Signer<'info>,
}

pub fn unbond_handler(ctx: Context<Unbond>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let mut treasury = WalletTreasury::outbound(
        accounts.registry_wallet.to_account_info(),
        accounts.operator.to_account_info(),
    );
    let operator = accounts.operator.key();
    let refund = processor::unbond(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.user.key,
        &operator,
        &mut treasury,
    )?;
    treasury.reconcile(&accounts.registry.ledger)?;

    let service_id = accounts.service.service_id;
    msg!("Operator {} unbonded from service {}, refund {}", operator, service_id, refund);
    if refund > 0 {
        emit!(RefundEvent {
            receiver: operator,
            amount: refund,
        });
    }
    emit!(OperatorUnbondEvent {
        operator,
        service_id,
    });
    Ok(())
}
