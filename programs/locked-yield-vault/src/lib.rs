// Locked Yield Vault - converts a pool token into a yield-bearing token,
// stakes it in an external reward pool and tracks time-locked shares
// Rewards are harvested by anyone and forwarded to a treasury

use anchor_lang::prelude::*;

pub mod adapters;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod events;
pub mod external;
pub mod harvest;
pub mod instructions;
pub mod interfaces;
pub mod ledger;
pub mod lock;
pub mod state;

use instructions::*;
use state::VaultConfig;

declare_id!("761pMQsiBhfQ2RPAHcVPpwXqDDgX6ovSvUQKHD1ocBfo");

#[program]
pub mod locked_yield_vault {
    use super::*;

    /// Initialize a vault bound to one conversion service and one reward pool
    ///
    /// Security considerations:
    /// - Validates the pool's staking mint equals the yield mint
    /// - Validates the pool's reward mint equals the configured reward mint
    /// - Pins both external programs so later calls cannot swap them
    pub fn initialize(ctx: Context<Initialize>, config: VaultConfig) -> Result<()> {
        instructions::initialize::handler(ctx, config)
    }

    /// Deposit the pool token, convert it and stake the result
    ///
    /// Shares are minted 1:1 with the deposited amount and the receiver's
    /// lock restarts from now.
    pub fn deposit_bpt(ctx: Context<DepositBpt>, amount: u64) -> Result<()> {
        instructions::deposit_bpt::handler(ctx, amount)
    }

    /// Deposit the yield token directly and stake it
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Burn unlocked shares and return the underlying to a recipient
    ///
    /// Security considerations:
    /// - Rejects while the owner's lock is running
    /// - Delegated callers spend their allowance
    /// - Unstaked tokens go straight from the pool to the recipient
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, amount)
    }

    /// Claim pool rewards and forward the claimed amount to the treasury
    ///
    /// Permissionless; a zero claim succeeds without a transfer.
    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        instructions::harvest::handler(ctx)
    }

    /// Set the amount of shares a delegate may withdraw for the owner
    pub fn approve(ctx: Context<Approve>, amount: u64) -> Result<()> {
        instructions::approve::handler(ctx, amount)
    }

    /// Authority-only treasury rotation
    pub fn set_treasury(ctx: Context<SetTreasury>, new_treasury: Pubkey) -> Result<()> {
        instructions::set_treasury::handler(ctx, new_treasury)
    }
}
