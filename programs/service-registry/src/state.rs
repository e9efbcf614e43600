#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

use crate::{
    constants::*,
    ledger::{DepositPolicy, Ledger},
    service_state::ServiceState,
};

#[account]
#[derive(Debug, Default, PartialEq)]
pub struct ServiceRegistry {
    pub owner: Pubkey,                   // 32 bytes
    pub manager: Pubkey,                 // 32 bytes
    pub drainer: Pubkey,                 // 32 bytes
    pub agent_registry: Option<Pubkey>,  // 1 + 32 bytes, None skips agent id checks
    pub deposit_policy: DepositPolicy,   // 1 byte
    pub ledger: Ledger,                  // 24 bytes
    pub total_supply: u128,              // 16 bytes
    pub locked: bool,                    // 1 byte
    pub wallet_key: Pubkey,              // 32 bytes
    pub wallet_bump: u8,                 // 1 byte
    pub multisig_whitelist: Vec<Pubkey>, // 4 + MAX_MULTISIG_IMPLEMENTATIONS * 32 bytes
}

impl ServiceRegistry {
    pub const LEN: usize = DISCRIMINATOR_SIZE
        + PUBKEY_SIZE // owner
        + PUBKEY_SIZE // manager
        + PUBKEY_SIZE // drainer
        + OPTION_TAG_SIZE + PUBKEY_SIZE // agent_registry
        + ENUM_TAG_SIZE // deposit_policy
        + Ledger::LEN // ledger
        + U128_SIZE // total_supply
        + BOOL_SIZE // locked
        + PUBKEY_SIZE // wallet_key
        + U8_SIZE // wallet_bump
        + VEC_PREFIX_SIZE + MAX_MULTISIG_IMPLEMENTATIONS * PUBKEY_SIZE; // multisig_whitelist
}

/// Escrow for deposits, bonds and slashed funds.
/// PDA seeds: ["registry_wallet", registry]
#[account]
#[derive(Debug, Default)]
pub struct RegistryWallet {
    pub registry: Pubkey,
    pub bump: u8,
}

impl RegistryWallet {
    pub const LEN: usize = DISCRIMINATOR_SIZE + PUBKEY_SIZE + U8_SIZE;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgentParams {
    pub slots: u32,
    pub bond: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgentParam {
    pub agent_id: u32,
    pub slots: u32,
    pub bond: u64,
}

impl AgentParam {
    pub const LEN: usize = U32_SIZE + U32_SIZE + U64_SIZE;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgentInstance {
    pub agent_instance: Pubkey,
    pub agent_id: u32,
    pub operator: Pubkey,
}

impl AgentInstance {
    pub const LEN: usize = PUBKEY_SIZE + U32_SIZE + PUBKEY_SIZE;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperatorBalance {
    pub operator: Pubkey,
    pub balance: u64,
    pub num_instances: u32,
}

impl OperatorBalance {
    pub const LEN: usize = PUBKEY_SIZE + U64_SIZE + U32_SIZE;
}

/// PDA seeds: ["service", registry, service_id]
#[account]
#[derive(Debug, Default, PartialEq)]
pub struct ServiceAccount {
    pub service_id: u128,                      // 16 bytes
    pub registry: Pubkey,                      // 32 bytes
    pub service_owner: Pubkey,                 // 32 bytes
    pub security_deposit: u64,                 // 8 bytes
    pub multisig: Pubkey,                      // 32 bytes
    pub config_hash: [u8; 32],                 // 32 bytes
    pub threshold: u32,                        // 4 bytes
    pub max_num_agent_instances: u32,          // 4 bytes
    pub num_agent_instances: u32,              // 4 bytes
    pub state: ServiceState,                   // 1 byte
    pub bump: u8,                              // 1 byte
    pub agent_params: Vec<AgentParam>,         // 4 + MAX_AGENT_IDS_PER_SERVICE * AgentParam::LEN
    pub agent_instances: Vec<AgentInstance>,   // 4 + MAX_AGENT_INSTANCES_PER_SERVICE * AgentInstance::LEN
    pub operators: Vec<OperatorBalance>,       // 4 + MAX_AGENT_INSTANCES_PER_SERVICE * OperatorBalance::LEN
    pub previous_config_hashes: Vec<[u8; 32]>, // 4 + MAX_CONFIG_HASHES_PER_SERVICE * 32
}

impl ServiceAccount {
    pub const LEN: usize = DISCRIMINATOR_SIZE
        + U128_SIZE // service_id
        + PUBKEY_SIZE // registry
        + PUBKEY_SIZE // service_owner
        + U64_SIZE // security_deposit
        + PUBKEY_SIZE // multisig
        + HASH_SIZE // config_hash
        + U32_SIZE // threshold
        + U32_SIZE // max_num_agent_instances
        + U32_SIZE // num_agent_instances
        + ENUM_TAG_SIZE // state
        + U8_SIZE // bump
        + VEC_PREFIX_SIZE + MAX_AGENT_IDS_PER_SERVICE * AgentParam::LEN
        + VEC_PREFIX_SIZE + MAX_AGENT_INSTANCES_PER_SERVICE * AgentInstance::LEN
        + VEC_PREFIX_SIZE + MAX_AGENT_INSTANCES_PER_SERVICE * OperatorBalance::LEN
        + VEC_PREFIX_SIZE + MAX_CONFIG_HASHES_PER_SERVICE * HASH_SIZE;

    pub fn agent_param(&self, agent_id: u32) -> Option<&AgentParam> {
        self.agent_params.iter().find(|p| p.agent_id == agent_id)
    }

    pub fn operator_balance(&self, operator: &Pubkey) -> u64 {
        self.operators
            .iter()
            .find(|o| o.operator == *operator)
            .map(|o| o.balance)
            .unwrap_or(0)
    }

    pub fn view(&self) -> ServiceView {
        ServiceView {
            service_id: self.service_id,
            service_owner: self.service_owner,
            state: self.state,
            security_deposit: self.security_deposit,
            multisig: self.multisig,
            config_hash: self.config_hash,
            threshold: self.threshold,
            max_num_agent_instances: self.max_num_agent_instances,
            num_agent_instances: self.num_agent_instances,
            agent_ids: self.agent_params.iter().map(|p| p.agent_id).collect(),
            agent_params: self
                .agent_params
                .iter()
                .map(|p| AgentParams {
                    slots: p.slots,
                    bond: p.bond,
                })
                .collect(),
            agent_instances: self
                .agent_instances
                .iter()
                .map(|i| i.agent_instance)
                .collect(),
        }
    }
}

/// Read model returned by `get_service`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct ServiceView {
    pub service_id: u128,
    pub service_owner: Pubkey,
    pub state: ServiceState,
    pub security_deposit: u64,
    pub multisig: Pubkey,
    pub config_hash: [u8; 32],
    pub threshold: u32,
    pub max_num_agent_instances: u32,
    pub num_agent_instances: u32,
    pub agent_ids: Vec<u32>,
    pub agent_params: Vec<AgentParams>,
    pub agent_instances: Vec<Pubkey>,
}
