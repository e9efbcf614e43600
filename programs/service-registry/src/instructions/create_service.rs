use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::ErrorCode,
    events::CreateServiceEvent,
    processor,
    service::ServiceConfig,
    state::{ServiceAccount, ServiceRegistry},
    validator,
};

#[derive(Accounts)]
#[instruction(service_id: u128)]
pub struct CreateService<'info> {
    #[account(mut)]
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        init,
        payer = user,
        space = ServiceAccount::LEN,
        seeds = [SERVICE_SEED, registry.key().as_ref(), &service_id.to_le_bytes()[..]],
        bump,
    )]
    pub service: Account<'info, ServiceAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn create_service_handler(
    ctx: Context<CreateService>,
    service_id: u128,
    service_owner: Pubkey,
    config: ServiceConfig,
) -> Result<()> {
    require!(
        ctx.accounts.registry.total_supply.checked_add(1) == Some(service_id),
        ErrorCode::WrongServiceId
    );

    let registry_key = ctx.accounts.registry.key();
    let agents = validator::for_registry(
        ctx.accounts.registry.agent_registry,
        ctx.remaining_accounts,
    );
    let accounts = &mut *ctx.accounts;
    let created = processor::create(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.user.key,
        service_owner,
        &config,
        agents.as_ref(),
    )?;

    let service = &mut accounts.service;
    service.registry = registry_key;
    service.bump = ctx.bumps.service;

    msg!(
        "Service {} created with config {}",
        created,
        hex::encode(config.config_hash)
    );
    emit!(CreateServiceEvent {
        service_id: created,
        service_owner,
        config_hash: config.config_hash,
    });
    Ok(())
}
