#![allow(unexpected_cfgs)]
//! Service registry
//!
//! Keeps multi-agent services through their registration lifecycle. A service
//! owner posts a security deposit, operators bond their agent instances into
//! the service's slots, the filled slot set becomes the owners of a multisig,
//! and the multisig may slash its own operators. Every lamport is escrowed in
//! the registry wallet PDA and accounted for by the registry ledger.

use anchor_lang::prelude::*;

pub mod allocator;
pub mod constants;
pub mod error;
pub mod events;
pub mod guard;
pub mod instructions;
pub mod ledger;
pub mod multisig;
pub mod pda;
pub mod processor;
pub mod service;
pub mod service_state;
pub mod state;
pub mod treasury;
pub mod validator;

pub use instructions::*;
pub use ledger::DepositPolicy;
pub use service::ServiceConfig;
pub use state::ServiceView;

declare_id!("9Q2mQxDLH91HLaQUYyxV5n9WhA1jzgVThJwfJTNqEUNP");

#[program]
pub mod service_registry {
    use super::*;

    /// Creates the registry and its escrow wallet. The signer becomes the
    /// registry owner. With `agent_registry` set, agent ids must be backed by
    /// agent accounts of that program, passed as remaining accounts.
    pub fn initialize(
        ctx: Context<Initialize>,
        manager: Pubkey,
        drainer: Pubkey,
        agent_registry: Option<Pubkey>,
        deposit_policy: DepositPolicy,
    ) -> Result<()> {
        instructions::initialize::initialize_handler(ctx, manager, drainer, agent_registry, deposit_policy)
    }

    /// `service_id` must be the next id in sequence.
    pub fn create(
        ctx: Context<CreateService>,
        service_id: u128,
        service_owner: Pubkey,
        config: ServiceConfig,
    ) -> Result<()> {
        instructions::create_service::create_service_handler(ctx, service_id, service_owner, config)
    }

    pub fn update(ctx: Context<UpdateService>, config: ServiceConfig) -> Result<()> {
        instructions::update_service::update_service_handler(ctx, config)
    }

    pub fn activate_registration(ctx: Context<ActivateRegistration>, deposit: u64) -> Result<()> {
        instructions::activate_registration::activate_registration_handler(ctx, deposit)
    }

    /// Bonds `value` for the operator's batch of instances.
    pub fn register_agents(
        ctx: Context<RegisterAgents>,
        agent_instances: Vec<Pubkey>,
        agent_ids: Vec<u32>,
        value: u64,
    ) -> Result<()> {
        instructions::register_agents::register_agents_handler(ctx, agent_instances, agent_ids, value)
    }

    /// Creates the service multisig through a whitelisted factory program.
    pub fn deploy<'info>(
        ctx: Context<'_, '_, 'info, 'info, Deploy<'info>>,
        payload: Vec<u8>,
    ) -> Result<()> {
        instructions::deploy::deploy_handler(ctx, payload)
    }

    pub fn slash(
        ctx: Context<Slash>,
        agent_instances: Vec<Pubkey>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::slash::slash_handler(ctx, agent_instances, amounts)
    }

    pub fn terminate(ctx: Context<Terminate>) -> Result<()> {
        instructions::terminate::terminate_handler(ctx)
    }

    pub fn unbond(ctx: Context<Unbond>) -> Result<()> {
        instructions::unbond::unbond_handler(ctx)
    }

    pub fn drain(ctx: Context<Drain>) -> Result<u64> {
        instructions::drain::drain_handler(ctx)
    }

    pub fn transfer_service(ctx: Context<TransferService>, new_owner: Pubkey) -> Result<()> {
        instructions::transfer_service::transfer_service_handler(ctx, new_owner)
    }

    pub fn change_owner(ctx: Context<ChangeRegistry>, new_owner: Pubkey) -> Result<()> {
        instructions::admin::change_owner_handler(ctx, new_owner)
    }

    pub fn change_manager(ctx: Context<ChangeRegistry>, new_manager: Pubkey) -> Result<()> {
        instructions::admin::change_manager_handler(ctx, new_manager)
    }

    pub fn change_drainer(ctx: Context<ChangeRegistry>, new_drainer: Pubkey) -> Result<()> {
        instructions::admin::change_drainer_handler(ctx, new_drainer)
    }

    pub fn change_multisig_permission(
        ctx: Context<ChangeRegistry>,
        implementation: Pubkey,
        permission: bool,
    ) -> Result<()> {
        instructions::admin::change_multisig_permission_handler(ctx, implementation, permission)
    }

    pub fn change_deposit_policy(
        ctx: Context<ChangeRegistry>,
        policy: DepositPolicy,
    ) -> Result<()> {
        instructions::admin::change_deposit_policy_handler(ctx, policy)
    }

    pub fn get_service(ctx: Context<ViewService>) -> Result<ServiceView> {
        instructions::views::get_service_handler(ctx)
    }

    pub fn get_operator_balance(ctx: Context<ViewService>, operator: Pubkey) -> Result<u64> {
        instructions::views::get_operator_balance_handler(ctx, operator)
    }

    pub fn get_previous_config_hashes(ctx: Context<ViewService>) -> Result<Vec<[u8; 32]>> {
        instructions::views::get_previous_config_hashes_handler(ctx)
    }

    pub fn get_agent_instances(ctx: Context<ViewService>, agent_id: u32) -> Result<Vec<Pubkey>> {
        instructions::views::get_agent_instances_handler(ctx, agent_id)
    }
}
