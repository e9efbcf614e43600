use anchor_lang::{
    prelude::*,
    solana_program::{
        hash::hash,
        instruction::{AccountMeta, Instruction},
        program::{get_return_data, invoke},
    },
};

use crate::error::ErrorCode;

/// A wallet factory able to materialise a multisig from a set of owners.
pub trait MultisigAdapter {
    /// Identity checked against the registry whitelist.
    fn implementation(&self) -> Pubkey;

    fn create_wallet(&mut self, owners: &[Pubkey], threshold: u32, payload: &[u8])
        -> Result<Pubkey>;
}

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateWalletArgs {
    pub owners: Vec<Pubkey>,
    pub threshold: u32,
    pub payload: Vec<u8>,
}

pub fn create_wallet_discriminator() -> [u8; 8] {
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash(b"global:create_wallet").to_bytes()[..8]);
    discriminator
}

/// Calls `create_wallet` on a factory program and reads the wallet address
/// back from its return data.
pub struct CpiMultisigFactory<'a, 'info> {
    program: AccountInfo<'info>,
    accounts: &'a [AccountInfo<'info>],
}

impl<'a, 'info> CpiMultisigFactory<'a, 'info> {
    pub fn new(program: AccountInfo<'info>, accounts: &'a [AccountInfo<'info>]) -> Self {
        Self { program, accounts }
    }

    fn instruction(&self, owners: &[Pubkey], threshold: u32, payload: &[u8]) -> Result<Instruction> {
        let args = CreateWalletArgs {
            owners: owners.to_vec(),
            threshold,
            payload: payload.to_vec(),
        };
        let mut data = create_wallet_discriminator().to_vec();
        args.serialize(&mut data)
            .map_err(|_| error!(ErrorCode::MultisigCreationFailed))?;

        let accounts = self
            .accounts
            .iter()
            .map(|info| {
                if info.is_writable {
                    AccountMeta::new(*info.key, info.is_signer)
                } else {
                    AccountMeta::new_readonly(*info.key, info.is_signer)
                }
            })
            .collect();

        Ok(Instruction {
            program_id: *self.program.key,
            accounts,
            data,
        })
    }
}

impl MultisigAdapter for CpiMultisigFactory<'_, '_> {
    fn implementation(&self) -> Pubkey {
        *self.program.key
    }

    fn create_wallet(
        &mut self,
        owners: &[Pubkey],
        threshold: u32,
        payload: &[u8],
    ) -> Result<Pubkey> {
        require!(self.program.executable, ErrorCode::UnauthorizedMultisig);

        let instruction = self.instruction(owners, threshold, payload)?;
        let mut infos = self.accounts.to_vec();
        infos.push(self.program.clone());
        invoke(&instruction, &infos)?;

        let (program_id, data) = get_return_data().ok_or(ErrorCode::MultisigCreationFailed)?;
        require_keys_eq!(
            program_id,
            *self.program.key,
            ErrorCode::MultisigCreationFailed
        );
        let multisig = Pubkey::try_from(data.as_slice())
            .map_err(|_| error!(ErrorCode::MultisigCreationFailed))?;
        require_keys_neq!(multisig, Pubkey::default(), ErrorCode::MultisigCreationFailed);
        Ok(multisig)
    }
}
