use anchor_lang::prelude::*;

/// Custom error codes for the Locked Yield Vault program
#[error_code]
pub enum VaultError {
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Owner holds fewer shares than requested")]
    InsufficientBalance,

    #[msg("Vault: locked")]
    Locked,

    #[msg("Conversion service failed or under-delivered")]
    ConversionFailed,

    #[msg("Reward pool rejected the stake")]
    StakeFailed,

    #[msg("Reward pool rejected the withdrawal")]
    UnstakeFailed,

    #[msg("Reward pool rejected the reward claim")]
    ClaimFailed,

    #[msg("Unauthorized - caller is neither owner nor approved delegate")]
    Unauthorized,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Vault received less than the transferred amount")]
    TransferShortfall,

    #[msg("Share ledger invariant violated")]
    LedgerInvariant,

    #[msg("Invalid token mint - does not match vault configuration")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Reward pool does not match vault configuration")]
    InvalidPool,

    #[msg("Treasury must be a non-default address")]
    InvalidTreasury,

    #[msg("Lock duration must be greater than zero")]
    InvalidLockDuration,

    #[msg("Recipient does not match the supplied token account")]
    InvalidRecipient,

    #[msg("Accounts required by this pool operation were not supplied")]
    MissingAdapterAccounts,

    #[msg("Conversion service program or state does not match vault configuration")]
    InvalidConversionService,
}
