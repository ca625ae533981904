use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::{AccountMeta, Instruction},
    program::invoke_signed,
};

use crate::adapters::BalanceWatch;
use crate::errors::VaultError;
use crate::external::{IxData, GET_REWARD_IX, STAKE_IX, WITHDRAW_IX};
use crate::interfaces::StakingAdapter;

/// Accounts needed only by `claim`
pub struct RewardAccounts<'info> {
    /// pool-owned account rewards are paid from
    pub reward_vault: AccountInfo<'info>,
    pub vault_reward_account: AccountInfo<'info>,
}

/// Stakes the vault's yield token in the external reward pool
///
/// Each instruction only supplies the accounts its operations touch; calling
/// an operation without them fails with `MissingAdapterAccounts`. Every call
/// is checked against the token balances it should have moved.
pub struct RewardPoolAdapter<'a, 'info> {
    program: AccountInfo<'info>,
    pool: AccountInfo<'info>,
    /// vault authority PDA, the staker of record
    staker: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    pool_id: Option<u64>,
    signer_seeds: &'a [&'a [&'a [u8]]],
    /// pool-owned account holding staked tokens
    pool_custody: Option<AccountInfo<'info>>,
    /// vault yield-token account stakes are paid from
    stake_source: Option<AccountInfo<'info>>,
    recipient: Option<AccountInfo<'info>>,
    rewards: Option<RewardAccounts<'info>>,
}

impl<'a, 'info> RewardPoolAdapter<'a, 'info> {
    pub fn new(
        program: AccountInfo<'info>,
        pool: AccountInfo<'info>,
        staker: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        pool_id: Option<u64>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            program,
            pool,
            staker,
            token_program,
            pool_id,
            signer_seeds,
            pool_custody: None,
            stake_source: None,
            recipient: None,
            rewards: None,
        }
    }

    pub fn with_custody(mut self, pool_custody: AccountInfo<'info>) -> Self {
        self.pool_custody = Some(pool_custody);
        self
    }

    pub fn with_stake_source(mut self, stake_source: AccountInfo<'info>) -> Self {
        self.stake_source = Some(stake_source);
        self
    }

    /// Bind the token account `unstake` pays out to
    pub fn with_recipient(mut self, recipient: AccountInfo<'info>) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn with_rewards(mut self, rewards: RewardAccounts<'info>) -> Self {
        self.rewards = Some(rewards);
        self
    }

    fn required(account: &Option<AccountInfo<'info>>) -> Result<AccountInfo<'info>> {
        account
            .clone()
            .ok_or(error!(VaultError::MissingAdapterAccounts))
    }

    fn invoke(&self, data: Vec<u8>, accounts: Vec<AccountInfo<'info>>) -> Result<()> {
        let metas = accounts
            .iter()
            .map(|account| {
                let signer = account.key == self.staker.key;
                if account.is_writable {
                    AccountMeta::new(*account.key, signer)
                } else {
                    AccountMeta::new_readonly(*account.key, signer)
                }
            })
            .collect();

        let ix = Instruction {
            program_id: *self.program.key,
            accounts: metas,
            data,
        };

        let mut infos = accounts;
        infos.push(self.program.clone());
        invoke_signed(&ix, &infos, self.signer_seeds).map_err(Into::into)
    }
}

impl<'a, 'info> StakingAdapter for RewardPoolAdapter<'a, 'info> {
    fn pool(&self) -> Pubkey {
        *self.pool.key
    }

    fn stake(&mut self, amount: u64) -> Result<()> {
        let stake_source = Self::required(&self.stake_source)?;
        let pool_custody = Self::required(&self.pool_custody)?;
        let watch = BalanceWatch::start(&stake_source)?;
        let data = IxData::new(STAKE_IX)
            .pool_id(self.pool_id)
            .u64(amount)
            .into_bytes();

        self.invoke(
            data,
            vec![
                self.pool.clone(),
                self.staker.clone(),
                stake_source,
                pool_custody,
                self.token_program.clone(),
            ],
        )
        .map_err(|_| error!(VaultError::StakeFailed))?;

        watch.require_spent(amount, VaultError::StakeFailed)
    }

    fn unstake(&mut self, amount: u64, recipient: &Pubkey) -> Result<()> {
        let pool_custody = Self::required(&self.pool_custody)?;
        let recipient_account = Self::required(&self.recipient)?;
        require_keys_eq!(
            *recipient_account.key,
            *recipient,
            VaultError::InvalidRecipient
        );
        let watch = BalanceWatch::start(&recipient_account)?;

        let data = IxData::new(WITHDRAW_IX)
            .pool_id(self.pool_id)
            .u64(amount)
            .into_bytes();

        self.invoke(
            data,
            vec![
                self.pool.clone(),
                self.staker.clone(),
                pool_custody,
                recipient_account,
                self.token_program.clone(),
            ],
        )
        .map_err(|_| error!(VaultError::UnstakeFailed))?;

        watch.require_received(amount, VaultError::UnstakeFailed)
    }

    fn claim(&mut self) -> Result<u64> {
        let (reward_vault, destination) = match self.rewards.as_ref() {
            Some(rewards) => (
                rewards.reward_vault.clone(),
                rewards.vault_reward_account.clone(),
            ),
            None => return err!(VaultError::MissingAdapterAccounts),
        };
        let watch = BalanceWatch::start(&destination)?;

        let data = IxData::new(GET_REWARD_IX)
            .pool_id(self.pool_id)
            .into_bytes();

        self.invoke(
            data,
            vec![
                self.pool.clone(),
                self.staker.clone(),
                reward_vault,
                destination,
                self.token_program.clone(),
            ],
        )
        .map_err(|_| error!(VaultError::ClaimFailed))?;

        // only what this claim delivered; older dust stays put
        watch.received()?.ok_or(error!(VaultError::ClaimFailed))
    }
}
