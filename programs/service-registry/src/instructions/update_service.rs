use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::UpdateServiceEvent,
    processor,
    service::ServiceConfig,
    state::{ServiceAccount, ServiceRegistry},
    validator,
};

#[derive(Accounts)]
pub struct UpdateService<'info> {
    #[account(mut)]
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        mut,
        seeds = [SERVICE_SEED, registry.key().as_ref(), &service.service_id.to_le_bytes()[..]],
        bump = service.bump,
    )]
    pub service: Account<'info, ServiceAccount>,

    pub service_owner: Signer<'info>,

    pub user: Signer<'info>,
}

pub fn update_service_handler(ctx: Context<UpdateService>, config: ServiceConfig) -> Result<()> {
    let agents = validator::for_registry(
        ctx.accounts.registry.agent_registry,
        ctx.remaining_accounts,
    );
    let accounts = &mut *ctx.accounts;
    processor::update(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.user.key,
        accounts.service_owner.key,
        &config,
        agents.as_ref(),
    )?;

    msg!(
        "Service {} updated to config {}",
        accounts.service.service_id,
        hex::encode(config.config_hash)
    );
    emit!(UpdateServiceEvent {
        service_id: accounts.service.service_id,
        config_hash: config.config_hash,
    });
    Ok(())
}
