use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::TransferServiceEvent,
    processor,
    state::{ServiceAccount, ServiceRegistry},
};

#[derive(Accounts)]
pub struct TransferService<'info> {
    #[account(mut)]
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        mut,
        seeds = [SERVICE_SEED, registry.key().as_ref(), &service.service_id.to_le_bytes()[..]],
        bump = service.bump,
    )]
    pub service: Account<'info, ServiceAccount>,

    pub service_owner: Signer<'info>,
}

pub fn transfer_service_handler(ctx: Context<TransferService>, new_owner: Pubkey) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    processor::transfer_service(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.service_owner.key,
        new_owner,
    )?;

    emit!(TransferServiceEvent {
        service_id: accounts.service.service_id,
        new_owner,
    });
    Ok(())
}
