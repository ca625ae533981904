use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::interfaces::{AssetIntake, ConversionGateway, StakingAdapter};
use crate::ledger::ShareLedger;
use crate::lock::LockSchedule;
use crate::state::{DepositorPosition, ShareAllowance, VaultState};

/// Result of a successful deposit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositReceipt {
    pub shares_minted: u64,
    /// Yield token handed to the reward pool
    pub staked_amount: u64,
    pub unlock_at: i64,
}

/// Result of a successful withdrawal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawReceipt {
    pub shares_burned: u64,
    pub underlying_returned: u64,
}

/// Orchestrates deposits and withdrawals over the vault and one position
///
/// Checks run first, external calls second, and ledger/lock writes last, so a
/// failing dependency never leaves a half-applied deposit or withdrawal.
pub struct VaultController<'a> {
    vault: &'a mut VaultState,
}

impl<'a> VaultController<'a> {
    pub fn new(vault: &'a mut VaultState) -> Self {
        Self { vault }
    }

    pub fn lock_schedule(&self) -> LockSchedule {
        LockSchedule::new(self.vault.lock_duration)
    }

    /// Deposit the raw pool token: pull, convert, stake, then mint 1:1
    pub fn deposit_bpt<I, G, S>(
        &mut self,
        position: &mut DepositorPosition,
        amount: u64,
        now: i64,
        intake: &mut I,
        gateway: &mut G,
        adapter: &mut S,
    ) -> Result<DepositReceipt>
    where
        I: AssetIntake,
        G: ConversionGateway,
        S: StakingAdapter,
    {
        self.check_deposit(position, amount, now)?;

        let received = intake.pull(amount)?;
        require!(received >= amount, VaultError::TransferShortfall);

        let converted = gateway.convert(amount)?;
        require!(converted >= amount, VaultError::ConversionFailed);

        adapter.stake(converted)?;

        self.credit(position, amount, converted, now)
    }

    /// Deposit the already-converted yield token: pull, stake, then mint 1:1
    pub fn deposit<I, S>(
        &mut self,
        position: &mut DepositorPosition,
        amount: u64,
        now: i64,
        intake: &mut I,
        adapter: &mut S,
    ) -> Result<DepositReceipt>
    where
        I: AssetIntake,
        S: StakingAdapter,
    {
        self.check_deposit(position, amount, now)?;

        let received = intake.pull(amount)?;
        require!(received >= amount, VaultError::TransferShortfall);

        adapter.stake(amount)?;

        self.credit(position, amount, amount, now)
    }

    /// Burn `amount` shares from `position` and unstake the same underlying to `recipient`
    ///
    /// `caller` must own the position or hold an allowance from its owner.
    #[allow(clippy::too_many_arguments)]
    pub fn withdraw<S>(
        &mut self,
        caller: &Pubkey,
        position: &mut DepositorPosition,
        allowance: Option<&mut ShareAllowance>,
        amount: u64,
        recipient: &Pubkey,
        now: i64,
        adapter: &mut S,
    ) -> Result<WithdrawReceipt>
    where
        S: StakingAdapter,
    {
        require!(amount > 0, VaultError::InvalidAmount);

        let delegated = *caller != position.owner;
        let allowance = match allowance {
            Some(allowance) if delegated => {
                require!(
                    allowance.covers(&position.owner, caller, amount),
                    VaultError::Unauthorized
                );
                Some(allowance)
            }
            None if delegated => return err!(VaultError::Unauthorized),
            _ => None,
        };

        let schedule = self.lock_schedule();
        if !schedule.is_unlocked(position, now) {
            msg!(
                "position {} locked for {} more seconds",
                position.owner,
                schedule.remaining(position, now)
            );
            return err!(VaultError::Locked);
        }

        ShareLedger::check_burn(self.vault.total_shares, position, amount)?;
        let staked = self
            .vault
            .total_underlying_staked
            .checked_sub(amount)
            .ok_or(VaultError::MathOverflow)?;

        adapter.unstake(amount, recipient)?;

        ShareLedger::new(&mut self.vault.total_shares).burn(position, amount)?;
        self.vault.total_underlying_staked = staked;
        if let Some(allowance) = allowance {
            allowance.amount -= amount;
        }

        Ok(WithdrawReceipt {
            shares_burned: amount,
            underlying_returned: amount,
        })
    }

    fn check_deposit(&self, position: &DepositorPosition, amount: u64, now: i64) -> Result<()> {
        require!(amount > 0, VaultError::InvalidAmount);
        ShareLedger::check_mint(self.vault.total_shares, position, amount)?;
        self.vault
            .total_underlying_staked
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        self.lock_schedule().unlock_time(now)?;
        Ok(())
    }

    fn credit(
        &mut self,
        position: &mut DepositorPosition,
        shares: u64,
        staked_amount: u64,
        now: i64,
    ) -> Result<DepositReceipt> {
        let staked = self
            .vault
            .total_underlying_staked
            .checked_add(staked_amount)
            .ok_or(VaultError::MathOverflow)?;

        ShareLedger::new(&mut self.vault.total_shares).mint(position, shares)?;
        // cannot overflow: check_deposit already computed this unlock time
        let unlock_at = self.lock_schedule().extend_lock(position, now)?;
        position.last_deposit_at = now;
        self.vault.total_underlying_staked = staked;

        Ok(DepositReceipt {
            shares_minted: shares,
            staked_amount,
            unlock_at,
        })
    }
}

/// Sets the shares `delegate` may withdraw for the owner of `allowance`
pub fn approve(allowance: &mut ShareAllowance, amount: u64) {
    allowance.amount = amount;
}
