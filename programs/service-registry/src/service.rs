//! Lifecycle transitions of a single service.
//!
//! Every transition validates its whole input before it touches the service or
//! the ledger, so a failed call leaves both exactly as they were.

use anchor_lang::prelude::*;

use crate::{
    constants::*,
    error::ErrorCode,
    ledger::{Bucket, DepositPolicy, Ledger},
    multisig::MultisigAdapter,
    service_state::ServiceState,
    state::{AgentInstance, AgentParam, AgentParams, OperatorBalance, ServiceAccount},
    validator::AgentIdValidator,
};

/// Agent composition and signing parameters supplied on create and update.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub config_hash: [u8; 32],
    pub agent_ids: Vec<u32>,
    pub agent_params: Vec<AgentParams>,
    pub threshold: u32,
}

impl ServiceConfig {
    pub fn validate(&self, validator: &dyn AgentIdValidator) -> Result<Vec<AgentParam>> {
        require!(self.config_hash != [0u8; 32], ErrorCode::ZeroValue);
        require!(
            !self.agent_ids.is_empty() && self.agent_ids.len() == self.agent_params.len(),
            ErrorCode::WrongArrayLength
        );
        require!(
            self.agent_ids.len() <= MAX_AGENT_IDS_PER_SERVICE,
            ErrorCode::MaxAgentIdsPerServiceReached
        );

        let mut params: Vec<AgentParam> = Vec::with_capacity(self.agent_ids.len());
        let mut total_slots: u32 = 0;
        for (&agent_id, p) in self.agent_ids.iter().zip(self.agent_params.iter()) {
            require!(agent_id != 0, ErrorCode::WrongAgentId);
            require!(
                params.iter().all(|existing| existing.agent_id != agent_id),
                ErrorCode::WrongAgentId
            );
            require!(p.slots > 0 && p.bond > 0, ErrorCode::ZeroValue);
            require!(validator.exists(agent_id), ErrorCode::WrongAgentId);

            total_slots = total_slots
                .checked_add(p.slots)
                .ok_or(ErrorCode::MaxAgentInstancesPerServiceReached)?;
            params.push(AgentParam {
                agent_id,
                slots: p.slots,
                bond: p.bond,
            });
        }

        require!(
            total_slots as usize <= MAX_AGENT_INSTANCES_PER_SERVICE,
            ErrorCode::MaxAgentInstancesPerServiceReached
        );
        validate_threshold(self.threshold, total_slots)?;

        Ok(params)
    }
}

/// `ceil(2/3 * total_slots) <= threshold <= total_slots`
pub fn validate_threshold(threshold: u32, total_slots: u32) -> Result<()> {
    let min_threshold = total_slots
        .checked_mul(2)
        .ok_or(ErrorCode::Overflow)?
        .div_ceil(3);
    require!(
        threshold >= min_threshold && threshold <= total_slots,
        ErrorCode::WrongThreshold
    );
    Ok(())
}

/// Part of an operator bond moved to the slashed funds pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlashedOperator {
    pub agent_instance: Pubkey,
    pub operator: Pubkey,
    pub amount: u64,
}

impl ServiceAccount {
    /// Replaces the agent composition, keeping the superseded config hash.
    pub fn apply_config(
        &mut self,
        config_hash: [u8; 32],
        agent_params: Vec<AgentParam>,
        threshold: u32,
    ) -> Result<()> {
        let supersedes = self.config_hash != [0u8; 32] && self.config_hash != config_hash;
        if supersedes {
            require!(
                self.previous_config_hashes.len() < MAX_CONFIG_HASHES_PER_SERVICE,
                ErrorCode::ConfigHistoryFull
            );
            self.previous_config_hashes.push(self.config_hash);
        }

        self.config_hash = config_hash;
        self.max_num_agent_instances = agent_params.iter().map(|p| p.slots).sum();
        self.agent_params = agent_params;
        self.threshold = threshold;
        Ok(())
    }

    pub fn update(&mut self, config: &ServiceConfig, validator: &dyn AgentIdValidator) -> Result<()> {
        // Any registered instance locks the configuration until terminate and unbond.
        let open_registration =
            self.state == ServiceState::ActiveRegistration && self.num_agent_instances == 0;
        require!(
            self.state.is_configurable() || open_registration,
            ErrorCode::WrongServiceState
        );

        let params = config.validate(validator)?;
        self.apply_config(config.config_hash, params, config.threshold)
    }

    pub fn activate_registration(
        &mut self,
        ledger: &mut Ledger,
        policy: DepositPolicy,
        deposit: u64,
    ) -> Result<()> {
        require!(self.state.is_configurable(), ErrorCode::WrongServiceState);

        let required = policy.security_deposit(&self.agent_params)?;
        require!(
            deposit == required,
            ErrorCode::IncorrectRegistrationDepositValue
        );

        ledger.post(Bucket::SecurityDeposit, &mut self.security_deposit, deposit)?;
        self.state = ServiceState::ActiveRegistration;
        Ok(())
    }

    /// Registers a batch of instances for `operator`, bonding `value`.
    pub fn register_agents(
        &mut self,
        ledger: &mut Ledger,
        operator: Pubkey,
        agent_instances: &[Pubkey],
        agent_ids: &[u32],
        value: u64,
    ) -> Result<Vec<AgentInstance>> {
        require_keys_neq!(operator, Pubkey::default(), ErrorCode::ZeroAddress);
        require!(
            self.state == ServiceState::ActiveRegistration,
            ErrorCode::WrongServiceState
        );
        require!(
            !agent_instances.is_empty() && agent_instances.len() == agent_ids.len(),
            ErrorCode::WrongArrayLength
        );
        require!(
            !self.is_instance_registered(&operator),
            ErrorCode::WrongOperator
        );

        let mut staged = self.clone();
        let mut total_bond: u64 = 0;
        let mut registered = Vec::with_capacity(agent_instances.len());
        for (&agent_instance, &agent_id) in agent_instances.iter().zip(agent_ids.iter()) {
            require_keys_neq!(agent_instance, Pubkey::default(), ErrorCode::ZeroAddress);
            require_keys_neq!(agent_instance, operator, ErrorCode::WrongOperator);
            require!(
                staged.operators.iter().all(|o| o.operator != agent_instance),
                ErrorCode::WrongOperator
            );

            let bond = staged
                .agent_param(agent_id)
                .ok_or(ErrorCode::AgentNotInService)?
                .bond;
            staged.fill(agent_id, agent_instance, operator)?;
            total_bond = total_bond.checked_add(bond).ok_or(ErrorCode::Overflow)?;
            registered.push(AgentInstance {
                agent_instance,
                agent_id,
                operator,
            });
        }
        require!(
            value == total_bond,
            ErrorCode::IncorrectAgentBondingValue
        );

        let index = match staged.operators.iter().position(|o| o.operator == operator) {
            Some(index) => index,
            None => {
                staged.operators.push(OperatorBalance {
                    operator,
                    balance: 0,
                    num_instances: 0,
                });
                staged.operators.len() - 1
            }
        };
        let entry = &mut staged.operators[index];
        entry.num_instances = entry
            .num_instances
            .checked_add(registered.len() as u32)
            .ok_or(ErrorCode::Overflow)?;

        let mut staged_ledger = *ledger;
        staged_ledger.post(Bucket::OperatorBond, &mut entry.balance, value)?;

        if staged.is_full() {
            staged.state = ServiceState::FinishedRegistration;
        }

        *ledger = staged_ledger;
        *self = staged;
        Ok(registered)
    }

    /// Materialises the service multisig from the registered instances.
    pub fn deploy<A: MultisigAdapter + ?Sized>(
        &mut self,
        adapter: &mut A,
        payload: &[u8],
    ) -> Result<Pubkey> {
        require!(
            self.state == ServiceState::FinishedRegistration,
            ErrorCode::WrongServiceState
        );

        let owners: Vec<Pubkey> = self
            .agent_instances
            .iter()
            .map(|i| i.agent_instance)
            .collect();
        let multisig = adapter.create_wallet(&owners, self.threshold, payload)?;
        require_keys_neq!(multisig, Pubkey::default(), ErrorCode::ZeroAddress);

        self.multisig = multisig;
        self.state = ServiceState::Deployed;
        Ok(multisig)
    }

    pub fn slash(
        &mut self,
        ledger: &mut Ledger,
        caller: &Pubkey,
        agent_instances: &[Pubkey],
        amounts: &[u64],
    ) -> Result<Vec<SlashedOperator>> {
        require!(
            self.state == ServiceState::Deployed,
            ErrorCode::WrongServiceState
        );
        require!(
            agent_instances.len() == amounts.len(),
            ErrorCode::WrongArrayLength
        );
        require_keys_eq!(*caller, self.multisig, ErrorCode::OnlyOwnServiceMultisig);

        let mut operators = self.operators.clone();
        let mut staged_ledger = *ledger;
        let mut slashed = Vec::with_capacity(agent_instances.len());
        for (agent_instance, &amount) in agent_instances.iter().zip(amounts.iter()) {
            let operator = self
                .agent_instances
                .iter()
                .find(|i| i.agent_instance == *agent_instance)
                .map(|i| i.operator)
                .ok_or(ErrorCode::AgentNotInService)?;
            let entry = operators
                .iter_mut()
                .find(|o| o.operator == operator)
                .ok_or(ErrorCode::OperatorHasNoInstances)?;

            let amount = staged_ledger.slash(&mut entry.balance, amount)?;
            slashed.push(SlashedOperator {
                agent_instance: *agent_instance,
                operator,
                amount,
            });
        }

        *ledger = staged_ledger;
        self.operators = operators;
        Ok(slashed)
    }

    /// Ends the service, returning the security deposit owed to the owner.
    pub fn terminate(&mut self, ledger: &mut Ledger) -> Result<u64> {
        require!(self.state.is_terminable(), ErrorCode::WrongServiceState);

        let deposit = self.security_deposit;
        let refund = ledger.release(Bucket::SecurityDeposit, &mut self.security_deposit, deposit)?;
        self.state = if self.num_agent_instances > 0 {
            ServiceState::TerminatedBonded
        } else {
            ServiceState::TerminatedUnbonded
        };
        Ok(refund)
    }

    /// Removes `operator` from a terminated service, returning its net bond.
    pub fn unbond(&mut self, ledger: &mut Ledger, operator: &Pubkey) -> Result<u64> {
        require_keys_neq!(*operator, Pubkey::default(), ErrorCode::ZeroAddress);
        require!(self.state.is_terminated(), ErrorCode::WrongServiceState);

        let index = self
            .operators
            .iter()
            .position(|o| o.operator == *operator && o.num_instances > 0)
            .ok_or(ErrorCode::OperatorHasNoInstances)?;

        let mut staged = self.clone();
        let mut staged_ledger = *ledger;
        let mut entry = staged.operators.remove(index);
        let balance = entry.balance;
        let refund = staged_ledger.release(Bucket::OperatorBond, &mut entry.balance, balance)?;
        let released = staged.release_operator(operator)?;
        require!(released == entry.num_instances, ErrorCode::OperatorHasNoInstances);

        if staged.operators.is_empty() {
            staged.state = ServiceState::TerminatedUnbonded;
        }

        *ledger = staged_ledger;
        *self = staged;
        Ok(refund)
    }
}
