//! Slot arithmetic for agent instances of a service.

use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    state::{AgentInstance, ServiceAccount},
};

impl ServiceAccount {
    pub fn filled_slots(&self, agent_id: u32) -> u32 {
        self.agent_instances
            .iter()
            .filter(|i| i.agent_id == agent_id)
            .count() as u32
    }

    /// Free slots for `agent_id`, failing when the agent is not part of the service.
    pub fn slots_remaining(&self, agent_id: u32) -> Result<u32> {
        let param = self
            .agent_param(agent_id)
            .ok_or(ErrorCode::AgentNotInService)?;
        Ok(param.slots.saturating_sub(self.filled_slots(agent_id)))
    }

    pub fn is_instance_registered(&self, agent_instance: &Pubkey) -> bool {
        self.agent_instances
            .iter()
            .any(|i| i.agent_instance == *agent_instance)
    }

    pub fn instances_of(&self, agent_id: u32) -> Vec<Pubkey> {
        self.agent_instances
            .iter()
            .filter(|i| i.agent_id == agent_id)
            .map(|i| i.agent_instance)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.num_agent_instances == self.max_num_agent_instances
    }

    /// Fills one slot of `agent_id` with `agent_instance`.
    pub fn fill(&mut self, agent_id: u32, agent_instance: Pubkey, operator: Pubkey) -> Result<()> {
        require!(
            self.slots_remaining(agent_id)? > 0,
            ErrorCode::AgentInstancesSlotsFilled
        );
        require!(
            !self.is_instance_registered(&agent_instance),
            ErrorCode::AgentInstanceRegistered
        );

        self.agent_instances.push(AgentInstance {
            agent_instance,
            agent_id,
            operator,
        });
        self.num_agent_instances = self
            .num_agent_instances
            .checked_add(1)
            .ok_or(ErrorCode::Overflow)?;
        Ok(())
    }

    /// Frees every slot held by `operator`, returning how many were released.
    pub fn release_operator(&mut self, operator: &Pubkey) -> Result<u32> {
        let before = self.agent_instances.len();
        self.agent_instances.retain(|i| i.operator != *operator);
        let released = (before - self.agent_instances.len()) as u32;
        self.num_agent_instances = self
            .num_agent_instances
            .checked_sub(released)
            .ok_or(ErrorCode::Overflow)?;
        Ok(released)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AgentParam;

    fn key(n: u8) -> Pubkey {
        Pubkey::new_from_array([n; 32])
    }

    fn service() -> ServiceAccount {
        ServiceAccount {
            agent_params: vec![
                AgentParam {
                    agent_id: 1,
                    slots: 2,
                    bond: 10,
                },
                AgentParam {
                    agent_id: 2,
                    slots: 1,
                    bond: 20,
                },
            ],
            max_num_agent_instances: 3,
            ..ServiceAccount::default()
        }
    }

    #[test]
    fn fill_until_full() {
        let mut service = service();
        assert_eq!(service.slots_remaining(1).unwrap(), 2);

        service.fill(1, key(10), key(1)).unwrap();
        service.fill(1, key(11), key(1)).unwrap();
        assert_eq!(service.slots_remaining(1).unwrap(), 0);
        assert!(!service.is_full());

        let err = service.fill(1, key(12), key(1)).unwrap_err();
        assert_eq!(err, ErrorCode::AgentInstancesSlotsFilled.into());

        service.fill(2, key(12), key(2)).unwrap();
        assert!(service.is_full());
        assert_eq!(service.num_agent_instances, 3);
    }

    #[test]
    fn unknown_agent_and_duplicate_instance_are_rejected() {
        let mut service = service();
        assert_eq!(
            service.slots_remaining(9).unwrap_err(),
            ErrorCode::AgentNotInService.into()
        );

        service.fill(1, key(10), key(1)).unwrap();
        assert_eq!(
            service.fill(2, key(10), key(1)).unwrap_err(),
            ErrorCode::AgentInstanceRegistered.into()
        );
        assert_eq!(service.num_agent_instances, 1);
    }

    #[test]
    fn release_operator_frees_only_its_slots() {
        let mut service = service();
        service.fill(1, key(10), key(1)).unwrap();
        service.fill(1, key(11), key(2)).unwrap();
        service.fill(2, key(12), key(1)).unwrap();

        assert_eq!(service.instances_of(1), vec![key(10), key(11)]);
        assert_eq!(service.release_operator(&key(1)).unwrap(), 2);
        assert_eq!(service.instances_of(1), vec![key(11)]);
        assert_eq!(service.num_agent_instances, 1);
        assert_eq!(service.slots_remaining(1).unwrap(), 1);
        assert_eq!(service.slots_remaining(2).unwrap(), 1);
        assert_eq!(service.release_operator(&key(1)).unwrap(), 0);
    }
}
