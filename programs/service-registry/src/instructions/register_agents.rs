use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::{DepositEvent, RegisterInstanceEvent},
    processor,
    state::{RegistryWallet, ServiceAccount, ServiceRegistry},
    treasury::WalletTreasury,
};

#[derive(Accounts)]
pub struct RegisterAgents<'info> {
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

    pub operator: Signer<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn register_agents_handler(
    ctx: Context<RegisterAgents>,
    agent_instances: Vec<Pubkey>,
    agent_ids: Vec<u32>,
    value: u64,
) -> Result<()> {
    let accounts = &mut *ctx.accounts;
    let mut treasury = WalletTreasury::inbound(
        accounts.registry_wallet.to_account_info(),
        accounts.user.to_account_info(),
        accounts.system_program.to_account_info(),
    );
    let operator = accounts.operator.key();
    let registered = processor::register_agents(
        &mut accounts.registry,
        &mut accounts.service,
        accounts.user.key,
        operator,
        &agent_instances,
        &agent_ids,
        value,
        &mut treasury,
    )?;
    treasury.reconcile(&accounts.registry.ledger)?;

    let service_id = accounts.service.service_id;
    emit!(DepositEvent {
        sender: accounts.user.key(),
        amount: value,
    });
    for instance in registered {
        emit!(RegisterInstanceEvent {
            operator,
            service_id,
            agent_instance: instance.agent_instance,
            agent_id: instance.agent_id,
        });
    }
    msg!(
        "Service {}: {}/{} agent instances registered",
        service_id,
        accounts.service.num_agent_instances,
        accounts.service.max_num_agent_instances
    );
    Ok(())
}
