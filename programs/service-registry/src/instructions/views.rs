use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{ServiceAccount, ServiceRegistry, ServiceView},
};

#[derive(Accounts)]
pub struct ViewService<'info> {
    pub registry: Account<'info, ServiceRegistry>,

    #[account(
        seeds = [SERVICE_SEED, registry.key().as_ref(), &service.service_id.to_le_bytes()[..]],
        bump = service.bump,
    )]
    pub service: Account<'info, ServiceAccount>,
}

pub fn get_service_handler(ctx: Context<ViewService>) -> Result<ServiceView> {
    Ok(ctx.accounts.service.view())
}

pub fn get_operator_balance_handler(ctx: Context<ViewService>, operator: Pubkey) -> Result<u64> {
    Ok(ctx.accounts.service.operator_balance(&operator))
}

pub fn get_previous_config_hashes_handler(ctx: Context<ViewService>) -> Result<Vec<[u8; 32]>> {
    Ok(ctx.accounts.service.previous_config_hashes.clone())
}

pub fn get_agent_instances_handler(ctx: Context<ViewService>, agent_id: u32) -> Result<Vec<Pubkey>> {
    Ok(ctx.accounts.service.instances_of(agent_id))
}
