use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::OperatorSlashedEvent,
    processor,
    state::{ServiceAccount, ServiceRegistry},
};

#[derive(Accounts)]
pub struct Slash<'info> {
    #[account(mut)]
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        mut,
        seeds = [SERVICE_SEED, registry.key().as_ref(), &service.service_id.to_le_bytes()[..]],
        bump = service.bump,
    )]
    pub service: Account<'info, ServiceAccount>,

    /// The service multisig.
    pub multisig: Signer<'info>,
}

pub fn slash_handler(ctx: Context<Slash>, agent_instances: Vec<Pubkey>, amounts: Vec<u64>) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let slashed = processor::slash(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.multisig.key,
        &agent_instances,
        &amounts,
    )?;

    let service_id = accounts.service.service_id;
    for entry in slashed {
        emit!(OperatorSlashedEvent {
            amount: entry.amount,
            operator: entry.operator,
            service_id,
        });
    }
    msg!(
        "Service {} slashed, pool {}",
        service_id,
        accounts.registry.ledger.slashed_funds
    );
    Ok(())
}
