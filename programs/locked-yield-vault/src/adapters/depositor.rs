use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};

use crate::adapters::BalanceWatch;
use crate::errors::VaultError;
use crate::external::{IxData, CONVERT_IX};
use crate::interfaces::ConversionGateway;

/// Converts the vault's raw pool token through the external depositor service
///
/// Conversion is always requested with `lock = true` (irreversible).
pub struct DepositorGateway<'a, 'info> {
    pub program: AccountInfo<'info>,
    pub depositor_state: AccountInfo<'info>,
    pub vault_authority: AccountInfo<'info>,
    pub source: AccountInfo<'info>,
    pub yield_mint: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    /// vault yield-token account credited by the conversion
    pub destination: AccountInfo<'info>,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> ConversionGateway for DepositorGateway<'a, 'info> {
    fn convert(&mut self, amount: u64) -> Result<u64> {
        let watch = BalanceWatch::start(&self.destination)?;

        let ix = Instruction {
            program_id: *self.program.key,
            accounts: vec![
                AccountMeta::new(*self.depositor_state.key, false),
                AccountMeta::new_readonly(*self.vault_authority.key, true),
                AccountMeta::new(*self.source.key, false),
                AccountMeta::new(*self.destination.key, false),
                AccountMeta::new(*self.yield_mint.key, false),
                AccountMeta::new_readonly(*self.token_program.key, false),
            ],
            data: IxData::new(CONVERT_IX).u64(amount).bool(true).into_bytes(),
        };

        invoke_signed(
            &ix,
            &[
                self.depositor_state.clone(),
                self.vault_authority.clone(),
                self.source.clone(),
                self.destination.clone(),
                self.yield_mint.clone(),
                self.token_program.clone(),
                self.program.clone(),
            ],
            self.signer_seeds,
        )
        .map_err(|_| error!(VaultError::ConversionFailed))?;

        // the peg is 1:1 today; read the delta instead of assuming it
        let converted = watch
            .received()?
            .ok_or(error!(VaultError::ConversionFailed))?;
        require!(converted >= amount, VaultError::ConversionFailed);

        Ok(converted)
    }
}
