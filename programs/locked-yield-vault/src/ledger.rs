use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::state::DepositorPosition;

/// Share accounting over the vault total and one depositor position
///
/// Only the controller holds a `ShareLedger`, so it is the single writer of
/// share balances.
pub struct ShareLedger<'a> {
    total_shares: &'a mut u64,
}

impl<'a> ShareLedger<'a> {
    pub fn new(total_shares: &'a mut u64) -> Self {
        Self { total_shares }
    }

    pub fn balance_of(&self, position: &DepositorPosition) -> u64 {
        position.share_balance
    }

    pub fn total_supply(&self) -> u64 {
        *self.total_shares
    }

    /// Runs every `mint` check against a supply snapshot without touching state
    pub fn check_mint(
        total_shares: u64,
        position: &DepositorPosition,
        amount: u64,
    ) -> Result<(u64, u64)> {
        require!(amount > 0, VaultError::InvalidAmount);

        let balance = position
            .share_balance
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;
        let total = total_shares
            .checked_add(amount)
            .ok_or(VaultError::MathOverflow)?;

        Ok((balance, total))
    }

    /// Runs every `burn` check against a supply snapshot without touching state
    pub fn check_burn(
        total_shares: u64,
        position: &DepositorPosition,
        amount: u64,
    ) -> Result<(u64, u64)> {
        require!(amount > 0, VaultError::InvalidAmount);
        require!(
            position.share_balance >= amount,
            VaultError::InsufficientBalance
        );

        let total = total_shares
            .checked_sub(amount)
            .ok_or(VaultError::LedgerInvariant)?;

        Ok((position.share_balance - amount, total))
    }

    pub(crate) fn mint(&mut self, position: &mut DepositorPosition, amount: u64) -> Result<()> {
        let (balance, total) = Self::check_mint(*self.total_shares, position, amount)?;
        position.share_balance = balance;
        *self.total_shares = total;
        self.verify(position)
    }

    pub(crate) fn burn(&mut self, position: &mut DepositorPosition, amount: u64) -> Result<()> {
        let (balance, total) = Self::check_burn(*self.total_shares, position, amount)?;
        position.share_balance = balance;
        *self.total_shares = total;
        self.verify(position)
    }

    fn verify(&self, position: &DepositorPosition) -> Result<()> {
        require!(
            position.share_balance <= *self.total_shares,
            VaultError::LedgerInvariant
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position() -> DepositorPosition {
        DepositorPosition {
            vault: Pubkey::default(),
            owner: Pubkey::new_unique(),
            share_balance: 0,
            unlock_at: 0,
            last_deposit_at: 0,
            bump: 0,
        }
    }

    #[test]
    fn test_mint_and_burn_keep_supply_in_sync() {
        let mut total = 0u64;
        let mut alice = position();
        let mut bob = position();

        {
            let mut ledger = ShareLedger::new(&mut total);
            ledger.mint(&mut alice, 700).unwrap();
            ledger.mint(&mut bob, 300).unwrap();
            ledger.burn(&mut alice, 200).unwrap();
            assert_eq!(ledger.balance_of(&alice), 500);
            assert_eq!(ledger.balance_of(&bob), 300);
            assert_eq!(ledger.total_supply(), 800);
        }

        assert_eq!(total, alice.share_balance + bob.share_balance);
    }

    #[test]
    fn test_zero_mint_rejected() {
        let mut total = 0u64;
        let mut alice = position();
        let mut ledger = ShareLedger::new(&mut total);

        let err = ledger.mint(&mut alice, 0).unwrap_err();
        assert_eq!(err, VaultError::InvalidAmount.into());
        assert_eq!(ledger.total_supply(), 0);
    }

    #[test]
    fn test_burn_past_balance_rejected() {
        let mut total = 0u64;
        let mut alice = position();
        let mut ledger = ShareLedger::new(&mut total);
        ledger.mint(&mut alice, 100).unwrap();

        let err = ledger.burn(&mut alice, 101).unwrap_err();
        assert_eq!(err, VaultError::InsufficientBalance.into());
        assert_eq!(alice.share_balance, 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn test_mint_overflow_leaves_state() {
        let mut total = u64::MAX - 10;
        let mut alice = position();
        alice.share_balance = u64::MAX - 10;
        let mut ledger = ShareLedger::new(&mut total);

        let err = ledger.mint(&mut alice, 11).unwrap_err();
        assert_eq!(err, VaultError::MathOverflow.into());
        assert_eq!(alice.share_balance, u64::MAX - 10);
        assert_eq!(ledger.total_supply(), u64::MAX - 10);
    }

    #[test]
    fn test_burn_with_corrupt_total_is_caught() {
        // position claims more than the vault ever issued
        let mut total = 5u64;
        let mut alice = position();
        alice.share_balance = 50;
        let mut ledger = ShareLedger::new(&mut total);

        let err = ledger.burn(&mut alice, 10).unwrap_err();
        assert_eq!(err, VaultError::LedgerInvariant.into());
    }
}
