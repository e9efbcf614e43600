use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::CreateMultisigWithAgentsEvent,
    multisig::CpiMultisigFactory,
    processor,
    state::{ServiceAccount, ServiceRegistry},
};

#[derive(Accounts)]
pub struct Deploy<'info> {
    #[account(mut)]
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        mut,
        seeds = [SERVICE_SEED, registry.key().as_ref(), &service.service_id.to_le_bytes()[..]],
        bump = service.bump,
    )]
    pub service: Account<'info, ServiceAccount>,

    /// CHECK: must be on the registry multisig whitelist
    pub multisig_factory: UncheckedAccount<'info>,

    pub service_owner: Signer<'info>,

    pub user: Signer<'info>,
}

/// Remaining accounts are forwarded to the factory in order.
pub fn deploy_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, Deploy<'info>>,
    payload: Vec<u8>,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let mut factory = CpiMultisigFactory::new(
        accounts.multisig_factory.to_account_info(),
        ctx.remaining_accounts,
    );
    let multisig = processor::deploy(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.user.key,
        accounts.service_owner.key,
        &mut factory,
        &payload,
    )?;

    let service_id = accounts.service.service_id;
    msg!("Service {} deployed with multisig {}", service_id, multisig);
    emit!(CreateMultisigWithAgentsEvent {
        service_id,
        multisig,
    });
    Ok(())
}
