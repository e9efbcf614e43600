//! Bookkeeping for every lamport the registry wallet holds on behalf of others.
//!
//! Each service keeps its own balances (the security deposit, one balance per
//! operator); the [`Ledger`] keeps the registry-wide totals next to them so the
//! wallet can be reconciled in a single comparison:
//!
//! `wallet - rent_reserve >= security_deposits + operator_bonds + slashed_funds`

use anchor_lang::prelude::*;

use crate::{constants::*, error::ErrorCode, state::AgentParam};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    SecurityDeposit,
    OperatorBond,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    pub security_deposits: u64,
    pub operator_bonds: u64,
    pub slashed_funds: u64,
}

impl Ledger {
    pub const LEN: usize = U64_SIZE * 3;

    fn total_mut(&mut self, bucket: Bucket) -> &mut u64 {
        match bucket {
            Bucket::SecurityDeposit => &mut self.security_deposits,
            Bucket::OperatorBond => &mut self.operator_bonds,
        }
    }

    /// Credits `amount` to a bucket balance and to the matching total.
    pub fn post(&mut self, bucket: Bucket, balance: &mut u64, amount: u64) -> Result<()> {
        let new_balance = balance.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        let total = self.total_mut(bucket);
        *total = total.checked_add(amount).ok_or(ErrorCode::Overflow)?;
        *balance = new_balance;
        Ok(())
    }

    /// Debits `amount` from a bucket balance, returning what is owed back.
    pub fn release(&mut self, bucket: Bucket, balance: &mut u64, amount: u64) -> Result<u64> {
        let new_balance = balance.checked_sub(amount).ok_or(ErrorCode::Overflow)?;
        let total = self.total_mut(bucket);
        *total = total.checked_sub(amount).ok_or(ErrorCode::Overflow)?;
        *balance = new_balance;
        Ok(amount)
    }

    /// Moves up to `amount` of an operator bond into the slashed funds pool.
    /// Slashing more than the balance floors it at zero.
    pub fn slash(&mut self, balance: &mut u64, amount: u64) -> Result<u64> {
        let slashed = amount.min(*balance);
        let slashed_funds = self
            .slashed_funds
            .checked_add(slashed)
            .ok_or(ErrorCode::Overflow)?;
        self.release(Bucket::OperatorBond, balance, slashed)?;
        self.slashed_funds = slashed_funds;
        Ok(slashed)
    }

    /// Empties the slashed funds pool.
    pub fn drain(&mut self) -> u64 {
        std::mem::take(&mut self.slashed_funds)
    }

    pub fn total_obligations(&self) -> Result<u64> {
        self.security_deposits
            .checked_add(self.operator_bonds)
            .and_then(|sum| sum.checked_add(self.slashed_funds))
            .ok_or_else(|| ErrorCode::Overflow.into())
    }

    /// Fails unless `available` lamports cover everything the ledger owes.
    pub fn reconcile(&self, available: u64) -> Result<()> {
        require!(
            available >= self.total_obligations()?,
            ErrorCode::TransferFailed
        );
        Ok(())
    }
}

/// How the security deposit is derived from a service's agent params.
#[repr(u8)]
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepositPolicy {
    #[default]
    MaxBond,
    SumOfBonds,
}

impl DepositPolicy {
    pub fn security_deposit(&self, agent_params: &[AgentParam]) -> Result<u64> {
        match self {
            DepositPolicy::MaxBond => Ok(agent_params.iter().map(|p| p.bond).max().unwrap_or(0)),
            DepositPolicy::SumOfBonds => agent_params
                .iter()
                .try_fold(0u64, |sum, p| sum.checked_add(p.bond))
                .ok_or_else(|| ErrorCode::Overflow.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(agent_id: u32, slots: u32, bond: u64) -> AgentParam {
        AgentParam {
            agent_id,
            slots,
            bond,
        }
    }

    #[test]
    fn post_and_release_move_balance_and_total_together() {
        let mut ledger = Ledger::default();
        let mut deposit = 0;
        let mut bond = 0;

        ledger.post(Bucket::SecurityDeposit, &mut deposit, 1_000).unwrap();
        ledger.post(Bucket::OperatorBond, &mut bond, 2_000).unwrap();
        assert_eq!(ledger.security_deposits, 1_000);
        assert_eq!(ledger.operator_bonds, 2_000);
        assert_eq!(ledger.total_obligations().unwrap(), 3_000);

        let refund = ledger.release(Bucket::SecurityDeposit, &mut deposit, 1_000).unwrap();
        assert_eq!(refund, 1_000);
        assert_eq!(deposit, 0);
        assert_eq!(ledger.total_obligations().unwrap(), 2_000);
    }

    #[test]
    fn release_below_zero_is_rejected_and_leaves_ledger_intact() {
        let mut ledger = Ledger::default();
        let mut bond = 0;
        ledger.post(Bucket::OperatorBond, &mut bond, 10).unwrap();

        let err = ledger.release(Bucket::OperatorBond, &mut bond, 11).unwrap_err();
        assert_eq!(err, ErrorCode::Overflow.into());
        assert_eq!(bond, 10);
        assert_eq!(ledger.operator_bonds, 10);
    }

    #[test]
    fn slash_is_capped_at_remaining_balance() {
        let mut ledger = Ledger::default();
        let mut bond = 0;
        ledger.post(Bucket::OperatorBond, &mut bond, 1_000).unwrap();

        assert_eq!(ledger.slash(&mut bond, 500).unwrap(), 500);
        assert_eq!(bond, 500);
        assert_eq!(ledger.slashed_funds, 500);

        assert_eq!(ledger.slash(&mut bond, 1_000).unwrap(), 500);
        assert_eq!(bond, 0);
        assert_eq!(ledger.slashed_funds, 1_000);
        assert_eq!(ledger.operator_bonds, 0);
        assert_eq!(ledger.total_obligations().unwrap(), 1_000);
    }

    #[test]
    fn drain_twice_returns_zero_the_second_time() {
        let mut ledger = Ledger {
            slashed_funds: 42,
            ..Ledger::default()
        };
        assert_eq!(ledger.drain(), 42);
        assert_eq!(ledger.drain(), 0);
        assert_eq!(ledger.slashed_funds, 0);
    }

    #[test]
    fn reconcile_requires_full_coverage() {
        let ledger = Ledger {
            security_deposits: 1,
            operator_bonds: 2,
            slashed_funds: 3,
        };
        assert!(ledger.reconcile(6).is_ok());
        assert!(ledger.reconcile(7).is_ok());
        assert_eq!(ledger.reconcile(5).unwrap_err(), ErrorCode::TransferFailed.into());
    }

    #[test]
    fn deposit_policies() {
        let params = [param(1, 3, 1_000), param(2, 4, 2_500)];
        assert_eq!(DepositPolicy::MaxBond.security_deposit(&params).unwrap(), 2_500);
        assert_eq!(DepositPolicy::SumOfBonds.security_deposit(&params).unwrap(), 3_500);

        let huge = [param(1, 1, u64::MAX), param(2, 1, 1)];
        assert_eq!(
            DepositPolicy::SumOfBonds.security_deposit(&huge).unwrap_err(),
            ErrorCode::Overflow.into()
        );
    }
}
