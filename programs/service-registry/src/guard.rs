use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    state::{ServiceAccount, ServiceRegistry},
};

impl ServiceRegistry {
    pub fn only_owner(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, ErrorCode::OwnerOnly);
        Ok(())
    }

    pub fn only_manager(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.manager, ErrorCode::ManagerOnly);
        Ok(())
    }

    pub fn only_drainer(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.drainer, ErrorCode::DrainerOnly);
        Ok(())
    }

    pub fn is_multisig_permitted(&self, implementation: &Pubkey) -> bool {
        self.multisig_whitelist.contains(implementation)
    }

    pub fn lock(&mut self) -> Result<()> {
        require!(!self.locked, ErrorCode::ReentrancyGuard);
        self.locked = true;
        Ok(())
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Runs `f` holding the registry lock. The lock is released whether `f`
    /// succeeds or not.
    pub fn non_reentrant<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.lock()?;
        let result = f(self);
        self.unlock();
        result
    }
}

impl ServiceAccount {
    pub fn only_service_owner(&self, owner: &Pubkey) -> Result<()> {
        require_keys_neq!(*owner, Pubkey::default(), ErrorCode::ZeroAddress);
        require_keys_eq!(*owner, self.service_owner, ErrorCode::OwnerOnly);
        Ok(())
    }
}
