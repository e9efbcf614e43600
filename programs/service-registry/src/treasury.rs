use anchor_lang::{
    prelude::*,
    system_program::{self, Transfer},
};

use crate::{error::ErrorCode, ledger::Ledger};

/// Custody of the lamports the ledger accounts for.
pub trait Treasury {
    /// Pulls exactly `amount` from `from` into custody.
    fn collect(&mut self, from: &Pubkey, amount: u64) -> Result<()>;

    /// Pays `amount` out of custody to `to`.
    fn pay(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// The registry wallet PDA paired with the single account on the other side
/// of the transfer.
pub struct WalletTreasury<'info> {
    wallet: AccountInfo<'info>,
    counterparty: AccountInfo<'info>,
    system_program: Option<AccountInfo<'info>>,
}

impl<'info> WalletTreasury<'info> {
    pub fn inbound(
        wallet: AccountInfo<'info>,
        payer: AccountInfo<'info>,
        system_program: AccountInfo<'info>,
    ) -> Self {
        Self {
            wallet,
            counterparty: payer,
            system_program: Some(system_program),
        }
    }

    pub fn outbound(wallet: AccountInfo<'info>, recipient: AccountInfo<'info>) -> Self {
        Self {
            wallet,
            counterparty: recipient,
            system_program: None,
        }
    }

    fn available(&self) -> Result<u64> {
        let reserve = Rent::get()?.minimum_balance(self.wallet.data_len());
        Ok(self.wallet.lamports().saturating_sub(reserve))
    }

    /// Checks that the wallet still covers every tracked obligation.
    pub fn reconcile(&self, ledger: &Ledger) -> Result<()> {
        ledger.reconcile(self.available()?)
    }
}

impl Treasury for WalletTreasury<'_> {
    fn collect(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*from, *self.counterparty.key, ErrorCode::TransferFailed);
        if amount == 0 {
            return Ok(());
        }
        let system_program = self
            .system_program
            .clone()
            .ok_or(ErrorCode::TransferFailed)?;

        let before = self.wallet.lamports();
        system_program::transfer(
            CpiContext::new(
                system_program,
                Transfer {
                    from: self.counterparty.clone(),
                    to: self.wallet.clone(),
                },
            ),
            amount,
        )?;
        let received = self
            .wallet
            .lamports()
            .checked_sub(before)
            .ok_or(ErrorCode::TransferFailed)?;
        require!(received == amount, ErrorCode::TransferFailed);
        Ok(())
    }

    fn pay(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        require_keys_eq!(*to, *self.counterparty.key, ErrorCode::TransferFailed);
        if amount == 0 {
            return Ok(());
        }
        require!(self.available()? >= amount, ErrorCode::TransferFailed);

        let debited = self
            .wallet
            .lamports()
            .checked_sub(amount)
            .ok_or(ErrorCode::TransferFailed)?;
        let credited = self
            .counterparty
            .lamports()
            .checked_add(amount)
            .ok_or(ErrorCode::Overflow)?;
        **self.wallet.try_borrow_mut_lamports()? = debited;
        **self.counterparty.try_borrow_mut_lamports()? = credited;

        msg!("Paid {} lamports to {}", amount, to);
        Ok(())
    }
}
