use anchor_lang::error_code;

#[error_code]
pub enum ErrorCode {
    #[msg("Only the registry manager can call this")]
    ManagerOnly,
    #[msg("Only the owner can call this")]
    OwnerOnly,
    #[msg("Only the drainer can call this")]
    DrainerOnly,
    #[msg("Address cannot be zero")]
    ZeroAddress,
    #[msg("Value cannot be zero")]
    ZeroValue,
    #[msg("Array is empty or lengths do not match")]
    WrongArrayLength,
    #[msg("Agent ID is zero, duplicated or unknown")]
    WrongAgentId,
    #[msg("Threshold is out of allowed bounds")]
    WrongThreshold,
    #[msg("Wrong service state")]
    WrongServiceState,
    #[msg("Agent is not part of the service")]
    AgentNotInService,
    #[msg("All slots for the agent ID are filled")]
    AgentInstancesSlotsFilled,
    #[msg("Agent instance is already registered in the service")]
    AgentInstanceRegistered,
    #[msg("Operator cannot be one of the agent instances")]
    WrongOperator,
    #[msg("Incorrect registration deposit value")]
    IncorrectRegistrationDepositValue,
    #[msg("Incorrect agent bonding value")]
    IncorrectAgentBondingValue,
    #[msg("Operator has no agent instances in the service")]
    OperatorHasNoInstances,
    #[msg("Multisig implementation is not whitelisted")]
    UnauthorizedMultisig,
    #[msg("Only the service multisig can slash its operators")]
    OnlyOwnServiceMultisig,
    #[msg("Reentrancy guard")]
    ReentrancyGuard,
    #[msg("Transfer failed")]
    TransferFailed,
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Maximum number of agent IDs per service reached")]
    MaxAgentIdsPerServiceReached,
    #[msg("Maximum number of agent instances per service reached")]
    MaxAgentInstancesPerServiceReached,
    #[msg("Config hash history is full")]
    ConfigHistoryFull,
    #[msg("Multisig whitelist is full")]
    MultisigWhitelistFull,
    #[msg("Multisig implementation did not return a wallet address")]
    MultisigCreationFailed,
    #[msg("Service id is not the next one in sequence")]
    WrongServiceId,
}
