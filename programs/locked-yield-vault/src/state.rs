use anchor_lang::prelude::*;

use crate::constants::{DEFAULT_LOCK_DURATION, EXCHANGE_RATE_PRECISION};
use crate::errors::VaultError;

/// Global vault state
///
/// Shares are minted 1:1 against deposits. Harvested rewards are sent to the
/// treasury and never raise `total_underlying_staked`, so the exchange rate
/// only moves if the conversion service over-delivers.
#[account]
pub struct VaultState {
    /// Initial owner/deployer, the only signer allowed to move the treasury
    pub authority: Pubkey,          // 32 bytes

    /// Raw liquidity-pool token accepted by `deposit_bpt`
    pub pool_token_mint: Pubkey,    // 32 bytes

    /// Yield-bearing token accepted by `deposit` and staked in the pool
    pub yield_mint: Pubkey,         // 32 bytes

    /// Token paid out by the reward pool
    pub reward_mint: Pubkey,        // 32 bytes

    /// Program id of the conversion service
    pub conversion_service: Pubkey, // 32 bytes

    /// Program id of the reward pool
    pub reward_pool_program: Pubkey, // 32 bytes

    /// Reward pool state account
    pub pool: Pubkey,               // 32 bytes

    /// Receiver of every harvested reward
    pub treasury: Pubkey,           // 32 bytes

    /// Strategy selector inside the reward pool; `None` for the legacy pool layout
    pub pool_id: Option<u64>,       // 9 bytes

    /// Seconds a depositor stays locked after their latest deposit
    pub lock_duration: i64,         // 8 bytes

    /// Sum of every depositor's share balance
    pub total_shares: u64,          // 8 bytes

    /// Yield token delegated to the reward pool
    pub total_underlying_staked: u64, // 8 bytes

    /// Lifetime reward forwarded to the treasury
    pub total_rewards_harvested: u64, // 8 bytes

    pub last_harvest_at: i64,       // 8 bytes

    /// Bump seed for vault state PDA
    pub bump: u8,                   // 1 byte

    /// Bump seed for vault authority PDA
    pub authority_bump: u8,         // 1 byte

    // Padding for future upgrades
    pub _reserved: [u8; 128],       // 128 bytes
}

impl VaultState {
    pub fn pool(&self) -> Pubkey {
        self.pool
    }

    pub fn treasury(&self) -> Pubkey {
        self.treasury
    }

    /// Underlying staked per share, scaled by `EXCHANGE_RATE_PRECISION`
    ///
    /// Returns `None` while no shares exist.
    pub fn exchange_rate(&self) -> Result<Option<u64>> {
        if self.total_shares == 0 {
            return Ok(None);
        }

        let rate = (self.total_underlying_staked as u128)
            .checked_mul(EXCHANGE_RATE_PRECISION as u128)
            .ok_or(error!(VaultError::MathOverflow))?
            .checked_div(self.total_shares as u128)
            .ok_or(error!(VaultError::MathOverflow))?;

        u64::try_from(rate)
            .map(Some)
            .map_err(|_| error!(VaultError::MathOverflow))
    }
}

/// Where a depositor sits in the lock state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PositionStatus {
    NoPosition,
    Locked,
    Unlockable,
}

/// Per-depositor record, created on the first deposit for a receiver
#[account]
pub struct DepositorPosition {
    pub vault: Pubkey,              // 32 bytes
    pub owner: Pubkey,              // 32 bytes
    pub share_balance: u64,         // 8 bytes
    /// Withdrawals are allowed once `now >= unlock_at`
    pub unlock_at: i64,             // 8 bytes
    pub last_deposit_at: i64,       // 8 bytes
    pub bump: u8,                   // 1 byte
}

impl DepositorPosition {
    pub const SPACE: usize = 8 + 32 + 32 + 8 + 8 + 8 + 1;

    /// Fill in identity on the first deposit; later calls are no-ops
    pub fn open(&mut self, vault: Pubkey, owner: Pubkey, bump: u8) {
        if self.owner == Pubkey::default() {
            self.vault = vault;
            self.owner = owner;
            self.bump = bump;
        }
    }

    pub fn status(&self, now: i64) -> PositionStatus {
        if self.share_balance == 0 {
            PositionStatus::NoPosition
        } else if now < self.unlock_at {
            PositionStatus::Locked
        } else {
            PositionStatus::Unlockable
        }
    }
}

/// Shares a delegate may withdraw on the owner's behalf
#[account]
pub struct ShareAllowance {
    pub vault: Pubkey,              // 32 bytes
    pub owner: Pubkey,              // 32 bytes
    pub delegate: Pubkey,           // 32 bytes
    pub amount: u64,                // 8 bytes
    pub bump: u8,                   // 1 byte
}

impl ShareAllowance {
    pub const SPACE: usize = 8 + 32 + 32 + 32 + 8 + 1;

    pub fn covers(&self, owner: &Pubkey, delegate: &Pubkey, amount: u64) -> bool {
        self.owner == *owner && self.delegate == *delegate && self.amount >= amount
    }
}

/// Deploy-time parameters
///
/// Both vault revisions share this type: the earlier one simply leaves
/// `pool_id` unset.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq)]
pub struct VaultConfig {
    pub treasury: Pubkey,
    pub lock_duration: i64,
    pub pool_id: Option<u64>,
}

impl VaultConfig {
    pub fn legacy(treasury: Pubkey) -> Self {
        Self {
            treasury,
            lock_duration: DEFAULT_LOCK_DURATION,
            pool_id: None,
        }
    }

    pub fn with_pool_id(mut self, pool_id: u64) -> Self {
        self.pool_id = Some(pool_id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.lock_duration > 0, VaultError::InvalidLockDuration);
        require!(
            self.treasury != Pubkey::default(),
            VaultError::InvalidTreasury
        );
        Ok(())
    }
}
