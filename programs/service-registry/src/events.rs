use anchor_lang::prelude::*;

use crate::ledger::DepositPolicy;

#[event]
pub struct CreateServiceEvent {
    pub service_id: u128,
    pub service_owner: Pubkey,
    pub config_hash: [u8; 32],
}

#[event]
pub struct UpdateServiceEvent {
    pub service_id: u128,
    pub config_hash: [u8; 32],
}

#[event]
pub struct ActivateRegistrationEvent {
    pub service_id: u128,
}

#[event]
pub struct DepositEvent {
    pub sender: Pubkey,
    pub amount: u64,
}

#[event]
pub struct RegisterInstanceEvent {
    pub operator: Pubkey,
    pub service_id: u128,
    pub agent_instance: Pubkey,
    pub agent_id: u32,
}

#[event]
pub struct CreateMultisigWithAgentsEvent {
    pub service_id: u128,
    pub multisig: Pubkey,
}

#[event]
pub struct RefundEvent {
    pub receiver: Pubkey,
    pub amount: u64,
}

#[event]
pub struct TerminateServiceEvent {
    pub service_id: u128,
}

#[event]
pub struct OperatorUnbondEvent {
    pub operator: Pubkey,
    pub service_id: u128,
}

#[event]
pub struct OperatorSlashedEvent {
    pub amount: u64,
    pub operator: Pubkey,
    pub service_id: u128,
}

#[event]
pub struct DrainEvent {
    pub drainer: Pubkey,
    pub amount: u64,
}

#[event]
pub struct OwnerUpdatedEvent {
    pub new_owner: Pubkey,
}

#[event]
pub struct ManagerUpdatedEvent {
    pub new_manager: Pubkey,
}

#[event]
pub struct DrainerUpdatedEvent {
    pub new_drainer: Pubkey,
}

#[event]
pub struct MultisigPermissionUpdatedEvent {
    pub implementation: Pubkey,
    pub permission: bool,
}

#[event]
pub struct DepositPolicyUpdatedEvent {
    pub policy: DepositPolicy,
}

#[event]
pub struct TransferServiceEvent {
    pub service_id: u128,
    pub new_owner: Pubkey,
}
