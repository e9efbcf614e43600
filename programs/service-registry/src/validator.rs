use anchor_lang::prelude::*;

use crate::pda::agent_pda;

/// Existence check for canonical agent ids.
pub trait AgentIdValidator {
    fn exists(&self, agent_id: u32) -> bool;
}

/// Agent ids are opaque integers; nothing is checked.
pub struct OpaqueAgentIds;

impl AgentIdValidator for OpaqueAgentIds {
    fn exists(&self, _agent_id: u32) -> bool {
        true
    }
}

/// Agent ids must be backed by an initialised account of the agent registry
/// program, supplied among the instruction's remaining accounts.
pub struct AgentRegistryAccounts<'a, 'info> {
    program_id: Pubkey,
    accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> AgentRegistryAccounts<'a, 'info> {
    pub fn new(program_id: Pubkey, accounts: &'a [AccountInfo<'info>]) -> Self {
        Self {
            program_id,
            accounts,
        }
    }
}

impl AgentIdValidator for AgentRegistryAccounts<'_, '_> {
    fn exists(&self, agent_id: u32) -> bool {
        let (agent, _) = agent_pda(agent_id, &self.program_id);
        self.accounts.iter().any(|info| {
            *info.key == agent && *info.owner == self.program_id && !info.data_is_empty()
        })
    }
}

/// Validator configured for `agent_registry`, reading agent accounts from `accounts`.
pub fn for_registry<'a, 'info>(
    agent_registry: Option<Pubkey>,
    accounts: &'a [AccountInfo<'info>],
) -> Box<dyn AgentIdValidator + 'a> {
    match agent_registry {
        Some(program_id) => Box::new(AgentRegistryAccounts::new(program_id, accounts)),
        None => Box::new(OpaqueAgentIds),
    }
}
