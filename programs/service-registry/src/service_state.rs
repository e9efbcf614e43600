#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

#[repr(u8)]
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ServiceState {
    #[default]
    NonExistent,
    PreRegistration,
    ActiveRegistration,
    FinishedRegistration,
    Deployed,
    TerminatedBonded,
    TerminatedUnbonded,
}

impl ServiceState {
    #[cfg(test)]
    pub const ALL: [ServiceState; 7] = [
        ServiceState::NonExistent,
        ServiceState::PreRegistration,
        ServiceState::ActiveRegistration,
        ServiceState::FinishedRegistration,
        ServiceState::Deployed,
        ServiceState::TerminatedBonded,
        ServiceState::TerminatedUnbonded,
    ];

    /// A new registration cycle may start from here.
    pub fn is_configurable(&self) -> bool {
        matches!(
            self,
            ServiceState::PreRegistration | ServiceState::TerminatedUnbonded
        )
    }

    pub fn is_terminated(&self) -> bool {
        matches!(
            self,
            ServiceState::TerminatedBonded | ServiceState::TerminatedUnbonded
        )
    }

    pub fn is_terminable(&self) -> bool {
        matches!(
            self,
            ServiceState::ActiveRegistration
                | ServiceState::FinishedRegistration
                | ServiceState::Deployed
        )
    }
}
