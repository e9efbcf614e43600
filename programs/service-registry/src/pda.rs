use anchor_lang::prelude::*;

use crate::constants::*;

pub fn registry_wallet_pda(registry: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REGISTRY_WALLET_SEED, &registry.to_bytes()], program_id)
}

/// Agent account in the agent registry program.
pub fn agent_pda(agent_id: u32, agent_registry: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[AGENT_SEED, &agent_id.to_le_bytes()], agent_registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_is_bound_to_registry() {
        let registry = Pubkey::new_unique();
        let (wallet, bump) = registry_wallet_pda(&registry, &crate::ID);
        let derived = Pubkey::create_program_address(
            &[REGISTRY_WALLET_SEED, &registry.to_bytes(), &[bump]],
            &crate::ID,
        )
        .unwrap();
        assert_eq!(wallet, derived);
    }
}
