//! Registry entry points.
//!
//! Each entry point holds the registry lock for its whole duration and runs
//! in the order access checks, service transition, then the value transfer or
//! multisig call. Transitions that move value are staged and committed only
//! once the transfer succeeds, so a failed call leaves the registry and the
//! service untouched. Instruction handlers wrap these with account plumbing
//! and events.

use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::ErrorCode,
    ledger::{DepositPolicy, Ledger},
    multisig::MultisigAdapter,
    service::{ServiceConfig, SlashedOperator},
    service_state::ServiceState,
    state::{AgentInstance, ServiceAccount, ServiceRegistry},
    treasury::Treasury,
    validator::AgentIdValidator,
};

/// Runs `transition` on copies of the service and ledger, then `transfer`.
/// The copies replace the originals only when both succeed.
fn settle<T>(
    service: &mut ServiceAccount,
    ledger: &mut Ledger,
    transition: impl FnOnce(&mut ServiceAccount, &mut Ledger) -> Result<T>,
    transfer: impl FnOnce(&T) -> Result<()>,
) -> Result<T> {
    let mut staged = service.clone();
    let mut staged_ledger = *ledger;
    let outcome = transition(&mut staged, &mut staged_ledger)?;
    transfer(&outcome)?;

    *service = staged;
    *ledger = staged_ledger;
    Ok(outcome)
}

pub fn create(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    service_owner: Pubkey,
    config: &ServiceConfig,
    validator: &dyn AgentIdValidator,
) -> Result<u128> {
    registry.non_reentrant(|registry| {
        registry.only_manager(caller)?;
        require_keys_neq!(service_owner, Pubkey::default(), ErrorCode::ZeroAddress);
        require!(
            service.state == ServiceState::NonExistent,
            ErrorCode::WrongServiceState
        );

        let params = config.validate(validator)?;
        let service_id = registry
            .total_supply
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;

        service.apply_config(config.config_hash, params, config.threshold)?;
        service.service_id = service_id;
        service.service_owner = service_owner;
        service.state = ServiceState::PreRegistration;
        registry.total_supply = service_id;
        Ok(service_id)
    })
}

pub fn update(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    service_owner: &Pubkey,
    config: &ServiceConfig,
    validator: &dyn AgentIdValidator,
) -> Result<()> {
    registry.non_reentrant(|registry| {
        registry.only_manager(caller)?;
        service.only_service_owner(service_owner)?;
        service.update(config, validator)
    })
}

pub fn activate_registration(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    service_owner: &Pubkey,
    deposit: u64,
    treasury: &mut dyn Treasury,
) -> Result<()> {
    registry.non_reentrant(|registry| {
        registry.only_manager(caller)?;
        service.only_service_owner(service_owner)?;

        let policy = registry.deposit_policy;
        settle(
            service,
            &mut registry.ledger,
            |service, ledger| service.activate_registration(ledger, policy, deposit),
            |_| treasury.collect(caller, deposit),
        )
    })
}

pub fn register_agents(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    operator: Pubkey,
    agent_instances: &[Pubkey],
    agent_ids: &[u32],
    value: u64,
    treasury: &mut dyn Treasury,
) -> Result<Vec<AgentInstance>> {
    registry.non_reentrant(|registry| {
        registry.only_manager(caller)?;

        settle(
            service,
            &mut registry.ledger,
            |service, ledger| {
                service.register_agents(ledger, operator, agent_instances, agent_ids, value)
            },
            |_| treasury.collect(caller, value),
        )
    })
}

pub fn deploy(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    service_owner: &Pubkey,
    adapter: &mut dyn MultisigAdapter,
    payload: &[u8],
) -> Result<Pubkey> {
    registry.non_reentrant(|registry| {
        registry.only_manager(caller)?;
        service.only_service_owner(service_owner)?;
        require!(
            registry.is_multisig_permitted(&adapter.implementation()),
            ErrorCode::UnauthorizedMultisig
        );

        service.deploy(adapter, payload)
    })
}

/// Callable by the service multisig only; not gated on the manager.
pub fn slash(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    agent_instances: &[Pubkey],
    amounts: &[u64],
) -> Result<Vec<SlashedOperator>> {
    registry.non_reentrant(|registry| {
        service.slash(&mut registry.ledger, caller, agent_instances, amounts)
    })
}

pub fn terminate(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    service_owner: &Pubkey,
    treasury: &mut dyn Treasury,
) -> Result<u64> {
    registry.non_reentrant(|registry| {
        registry.only_manager(caller)?;
        service.only_service_owner(service_owner)?;

        settle(
            service,
            &mut registry.ledger,
            |service, ledger| service.terminate(ledger),
            |refund| treasury.pay(service_owner, *refund),
        )
    })
}

pub fn unbond(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    operator: &Pubkey,
    treasury: &mut dyn Treasury,
) -> Result<u64> {
    registry.non_reentrant(|registry| {
        registry.only_manager(caller)?;

        settle(
            service,
            &mut registry.ledger,
            |service, ledger| service.unbond(ledger, operator),
            |refund| treasury.pay(operator, *refund),
        )
    })
}

/// Sends the slashed funds pool to the drainer. Returns 0 when the pool is empty.
pub fn drain(
    registry: &mut ServiceRegistry,
    caller: &Pubkey,
    treasury: &mut dyn Treasury,
) -> Result<u64> {
    registry.non_reentrant(|registry| {
        registry.only_drainer(caller)?;

        let mut ledger = registry.ledger;
        let amount = ledger.drain();
        if amount > 0 {
            treasury.pay(caller, amount)?;
        }
        registry.ledger = ledger;
        Ok(amount)
    })
}

pub fn transfer_service(
    registry: &mut ServiceRegistry,
    service: &mut ServiceAccount,
    caller: &Pubkey,
    new_owner: Pubkey,
) -> Result<()> {
    registry.non_reentrant(|_| {
        service.only_service_owner(caller)?;
        require_keys_neq!(new_owner, Pubkey::default(), ErrorCode::ZeroAddress);
        service.service_owner = new_owner;
        Ok(())
    })
}

pub fn change_owner(registry: &mut ServiceRegistry, caller: &Pubkey, new_owner: Pubkey) -> Result<()> {
    registry.non_reentrant(|registry| {
        registry.only_owner(caller)?;
        require_keys_neq!(new_owner, Pubkey::default(), ErrorCode::ZeroAddress);
        registry.owner = new_owner;
        Ok(())
    })
}

pub fn change_manager(
    registry: &mut ServiceRegistry,
    caller: &Pubkey,
    new_manager: Pubkey,
) -> Result<()> {
    registry.non_reentrant(|registry| {
        registry.only_owner(caller)?;
        require_keys_neq!(new_manager, Pubkey::default(), ErrorCode::ZeroAddress);
        registry.manager = new_manager;
        Ok(())
    })
}

pub fn change_drainer(
    registry: &mut ServiceRegistry,
    caller: &Pubkey,
    new_drainer: Pubkey,
) -> Result<()> {
    registry.non_reentrant(|registry| {
        registry.only_owner(caller)?;
        require_keys_neq!(new_drainer, Pubkey::default(), ErrorCode::ZeroAddress);
        registry.drainer = new_drainer;
        Ok(())
    })
}

pub fn change_multisig_permission(
    registry: &mut ServiceRegistry,
    caller: &Pubkey,
    implementation: Pubkey,
    permission: bool,
) -> Result<()> {
    registry.non_reentrant(|registry| {
        registry.only_owner(caller)?;
        require_keys_neq!(implementation, Pubkey::default(), ErrorCode::ZeroAddress);

        let whitelist = &mut registry.multisig_whitelist;
        if permission {
            if !whitelist.contains(&implementation) {
                require!(
                    whitelist.len() < MAX_MULTISIG_IMPLEMENTATIONS,
                    ErrorCode::MultisigWhitelistFull
                );
                whitelist.push(implementation);
            }
        } else {
            whitelist.retain(|key| *key != implementation);
        }
        Ok(())
    })
}

pub fn change_deposit_policy(
    registry: &mut ServiceRegistry,
    caller: &Pubkey,
    policy: DepositPolicy,
) -> Result<()> {
    registry.non_reentrant(|registry| {
        registry.only_owner(caller)?;
        registry.deposit_policy = policy;
        Ok(())
    })
}
