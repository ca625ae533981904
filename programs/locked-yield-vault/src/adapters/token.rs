use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::adapters::BalanceWatch;
use crate::errors::VaultError;
use crate::interfaces::{AssetIntake, RewardSink};

/// Pulls a depositor's tokens into a vault token account
pub struct TokenIntake<'info> {
    pub token_program: AccountInfo<'info>,
    pub from: AccountInfo<'info>,
    pub authority: AccountInfo<'info>,
    pub vault_account: AccountInfo<'info>,
}

impl<'info> AssetIntake for TokenIntake<'info> {
    fn pull(&mut self, amount: u64) -> Result<u64> {
        let watch = BalanceWatch::start(&self.vault_account)?;

        let transfer_ctx = CpiContext::new(
            self.token_program.clone(),
            Transfer {
                from: self.from.clone(),
                to: self.vault_account.clone(),
                authority: self.authority.clone(),
            },
        );
        token::transfer(transfer_ctx, amount)?;

        // trust the balance, not the transfer amount
        watch
            .received()?
            .ok_or(error!(VaultError::TransferShortfall))
    }
}

/// Sends harvested rewards from the vault to the treasury's token account
pub struct TreasurySink<'a, 'info> {
    pub token_program: AccountInfo<'info>,
    pub vault_reward_account: AccountInfo<'info>,
    pub vault_authority: AccountInfo<'info>,
    pub treasury_account: AccountInfo<'info>,
    pub treasury: Pubkey,
    pub signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> RewardSink for TreasurySink<'a, 'info> {
    fn recipient(&self) -> Pubkey {
        self.treasury
    }

    fn forward(&mut self, amount: u64) -> Result<()> {
        let transfer_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            Transfer {
                from: self.vault_reward_account.clone(),
                to: self.treasury_account.clone(),
                authority: self.vault_authority.clone(),
            },
            self.signer_seeds,
        );
        token::transfer(transfer_ctx, amount)
    }
}
