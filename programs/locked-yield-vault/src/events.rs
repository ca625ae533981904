use anchor_lang::prelude::*;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub authority: Pubkey,
    pub pool_token_mint: Pubkey,
    pub yield_mint: Pubkey,
    pub reward_mint: Pubkey,
    pub pool: Pubkey,
    pub pool_id: Option<u64>,
    pub treasury: Pubkey,
    pub lock_duration: i64,
    pub timestamp: i64,
}

/// Event emitted when shares are minted against a deposit
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub receiver: Pubkey,
    /// true when the raw pool token went through the conversion service
    pub converted: bool,
    pub amount: u64,
    pub staked_amount: u64,
    pub shares_minted: u64,
    pub unlock_at: i64,
    pub total_shares: u64,
    pub total_underlying_staked: u64,
    pub timestamp: i64,
}

/// Event emitted when shares are burned and the underlying is unstaked
#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub owner: Pubkey,
    pub recipient: Pubkey,
    pub shares_burned: u64,
    pub underlying_returned: u64,
    pub total_shares: u64,
    pub total_underlying_staked: u64,
    pub timestamp: i64,
}

/// Event emitted on every harvest, including zero-reward ones
#[event]
pub struct Harvested {
    pub vault: Pubkey,
    pub caller: Pubkey,
    pub treasury: Pubkey,
    pub reward_mint: Pubkey,
    pub reward: u64,
    pub total_rewards_harvested: u64,
    pub timestamp: i64,
}

#[event]
pub struct DelegateApproved {
    pub vault: Pubkey,
    pub owner: Pubkey,
    pub delegate: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct TreasuryUpdated {
    pub vault: Pubkey,
    pub old_treasury: Pubkey,
    pub new_treasury: Pubkey,
    pub timestamp: i64,
}
