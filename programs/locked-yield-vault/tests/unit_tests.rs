use anchor_lang::prelude::*;

#[cfg(test)]
mod tests {
    use super::*;
    use locked_yield_vault::{
        constants::*,
        errors::VaultError,
        ledger::ShareLedger,
        lock::LockSchedule,
        state::{DepositorPosition, VaultConfig},
    };

    #[test]
    fn test_pda_derivation() {
        let program_id = locked_yield_vault::id();
        let yield_mint = Pubkey::new_unique();
        let pool = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let delegate = Pubkey::new_unique();

        let (vault_state, _) = Pubkey::find_program_address(
            &[VAULT_SEED, yield_mint.as_ref(), pool.as_ref()],
            &program_id,
        );

        let (vault_authority, _) = Pubkey::find_program_address(
            &[VAULT_AUTHORITY_SEED, vault_state.as_ref()],
            &program_id,
        );

        let (position, _) = Pubkey::find_program_address(
            &[POSITION_SEED, vault_state.as_ref(), owner.as_ref()],
            &program_id,
        );

        let (allowance, _) = Pubkey::find_program_address(
            &[ALLOWANCE_SEED, vault_state.as_ref(), owner.as_ref(), delegate.as_ref()],
            &program_id,
        );

        assert_ne!(vault_state, vault_authority);
        assert_ne!(vault_state, position);
        assert_ne!(position, allowance);
        assert_ne!(vault_authority, allowance);
    }

    #[test]
    fn test_vault_per_pool() {
        // Same yield token staked in two pools yields two vaults
        let program_id = locked_yield_vault::id();
        let yield_mint = Pubkey::new_unique();

        let (vault_1, _) = Pubkey::find_program_address(
            &[VAULT_SEED, yield_mint.as_ref(), Pubkey::new_unique().as_ref()],
            &program_id,
        );
        let (vault_2, _) = Pubkey::find_program_address(
            &[VAULT_SEED, yield_mint.as_ref(), Pubkey::new_unique().as_ref()],
            &program_id,
        );

        assert_ne!(vault_1, vault_2);
    }

    #[test]
    fn test_legacy_config_defaults() {
        let treasury = Pubkey::new_unique();
        let config = VaultConfig::legacy(treasury);

        assert_eq!(config.lock_duration, 604_800);
        assert_eq!(config.pool_id, None);
        assert!(config.validate().is_ok());
        assert_eq!(config.clone().with_pool_id(170).pool_id, Some(170));
    }

    #[test]
    fn test_config_rejects_default_treasury() {
        let err = VaultConfig::legacy(Pubkey::default()).validate().unwrap_err();
        assert_eq!(err, VaultError::InvalidTreasury.into());
    }

    #[test]
    fn test_conversion_wiring_error_distinct_from_conversion_failure() {
        // appended last so earlier client-visible codes stay put
        assert_eq!(u32::from(VaultError::MissingAdapterAccounts), 6017);
        assert_eq!(u32::from(VaultError::InvalidConversionService), 6018);
        assert_ne!(
            anchor_lang::error::Error::from(VaultError::InvalidConversionService),
            anchor_lang::error::Error::from(VaultError::ConversionFailed)
        );
    }

    #[test]
    fn test_ledger_views_are_read_only() {
        let mut total = 40u64;
        let position = DepositorPosition {
            vault: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            share_balance: 40,
            unlock_at: 0,
            last_deposit_at: 0,
            bump: 0,
        };

        let ledger = ShareLedger::new(&mut total);
        assert_eq!(ledger.balance_of(&position), 40);
        assert_eq!(ledger.total_supply(), 40);

        assert_eq!(ShareLedger::check_mint(total, &position, 2).unwrap(), (42, 42));
        assert_eq!(ShareLedger::check_burn(total, &position, 40).unwrap(), (0, 0));
        assert_eq!(
            ShareLedger::check_burn(total, &position, 41).unwrap_err(),
            VaultError::InsufficientBalance.into()
        );
        assert_eq!(total, 40);
    }

    #[test]
    fn test_lock_schedule_remaining() {
        let schedule = LockSchedule::new(DEFAULT_LOCK_DURATION);
        let position = DepositorPosition {
            vault: Pubkey::new_unique(),
            owner: Pubkey::new_unique(),
            share_balance: 1,
            unlock_at: 1_000 + DEFAULT_LOCK_DURATION,
            last_deposit_at: 1_000,
            bump: 0,
        };

        assert_eq!(schedule.unlock_time(1_000).unwrap(), position.unlock_at);
        assert_eq!(schedule.remaining(&position, 1_000), DEFAULT_LOCK_DURATION);
        assert!(!schedule.is_unlocked(&position, position.unlock_at - 1));
        assert!(schedule.is_unlocked(&position, position.unlock_at));
        assert_eq!(schedule.remaining(&position, position.unlock_at + 5), 0);
    }
}
