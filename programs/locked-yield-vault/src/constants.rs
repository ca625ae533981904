// Constants for the Locked Yield Vault program

/// Seed for vault state PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for the PDA that owns the vault's token accounts and signs CPIs
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for per-depositor position PDAs
pub const POSITION_SEED: &[u8] = b"position";

/// Seed for share allowance PDAs
pub const ALLOWANCE_SEED: &[u8] = b"allowance";

/// Lock applied when a deployment does not choose one (1 week)
pub const DEFAULT_LOCK_DURATION: i64 = 7 * 24 * 60 * 60;

/// Precision of `VaultState::exchange_rate`
pub const EXCHANGE_RATE_PRECISION: u64 = 1_000_000_000;

/// Space for VaultState account (8 discriminator + 7 * 32 pubkeys + 32 treasury +
/// 9 pool_id + 8 lock_duration + 3 * 8 totals + 8 last_harvest_at + 1 bump +
/// 1 authority_bump + 128 padding)
pub const VAULT_STATE_SIZE: usize = 8 + 7 * 32 + 32 + 9 + 8 + 3 * 8 + 8 + 1 + 1 + 128;
