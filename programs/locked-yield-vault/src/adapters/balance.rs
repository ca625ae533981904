use anchor_lang::prelude::*;
use anchor_spl::token::accessor;

use crate::errors::VaultError;

/// Token balance read before an external call, compared against a fresh read after it
///
/// Reads go straight to account data, so several adapters may watch the same
/// token account without holding a cached `Account` copy. The account must
/// already be validated as an SPL token account by the instruction constraints.
pub struct BalanceWatch<'info> {
    account: AccountInfo<'info>,
    before: u64,
}

impl<'info> BalanceWatch<'info> {
    pub fn start(account: &AccountInfo<'info>) -> Result<Self> {
        Ok(Self {
            account: account.clone(),
            before: accessor::amount(account)?,
        })
    }

    pub fn before(&self) -> u64 {
        self.before
    }

    /// Growth since `start`; `None` when the balance shrank
    pub fn received(&self) -> Result<Option<u64>> {
        Ok(accessor::amount(&self.account)?.checked_sub(self.before))
    }

    /// Decrease since `start`; `None` when the balance grew
    pub fn spent(&self) -> Result<Option<u64>> {
        Ok(self.before.checked_sub(accessor::amount(&self.account)?))
    }

    /// Fails with `error` unless exactly `amount` arrived
    pub fn require_received(&self, amount: u64, error: VaultError) -> Result<()> {
        match self.received()? {
            Some(delta) if delta == amount => Ok(()),
            delta => {
                msg!("expected {} in, observed {:?}", amount, delta);
                Err(error!(error))
            }
        }
    }

    /// Fails with `error` unless exactly `amount` left
    pub fn require_spent(&self, amount: u64, error: VaultError) -> Result<()> {
        match self.spent()? {
            Some(delta) if delta == amount => Ok(()),
            delta => {
                msg!("expected {} out, observed {:?}", amount, delta);
                Err(error!(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_ACCOUNT_LEN: usize = 165;

    fn token_data(amount: u64) -> Vec<u8> {
        let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
        data[64..72].copy_from_slice(&amount.to_le_bytes());
        data
    }

    fn set_amount(account: &AccountInfo, amount: u64) {
        account.try_borrow_mut_data().unwrap()[64..72].copy_from_slice(&amount.to_le_bytes());
    }

    #[test]
    fn test_stale_balance_excluded_from_claim() {
        let key = Pubkey::new_unique();
        let owner = anchor_spl::token::ID;
        let mut lamports = 0u64;
        // 50 of dust already sitting in the reward account
        let mut data = token_data(50);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let watch = BalanceWatch::start(&info).unwrap();
        set_amount(&info, 80);

        assert_eq!(watch.before(), 50);
        assert_eq!(watch.received().unwrap(), Some(30));
    }

    #[test]
    fn test_shrinking_balance_is_not_a_receipt() {
        let key = Pubkey::new_unique();
        let owner = anchor_spl::token::ID;
        let mut lamports = 0u64;
        let mut data = token_data(80);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let watch = BalanceWatch::start(&info).unwrap();
        set_amount(&info, 50);

        assert_eq!(watch.received().unwrap(), None);
        assert_eq!(watch.spent().unwrap(), Some(30));
        assert_eq!(
            watch.require_received(0, VaultError::ClaimFailed).unwrap_err(),
            VaultError::ClaimFailed.into()
        );
    }

    #[test]
    fn test_under_delivery_rejected() {
        let key = Pubkey::new_unique();
        let owner = anchor_spl::token::ID;
        let mut lamports = 0u64;
        let mut data = token_data(0);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let watch = BalanceWatch::start(&info).unwrap();
        // pool pays one unit short
        set_amount(&info, 99);

        assert_eq!(
            watch.require_received(100, VaultError::UnstakeFailed).unwrap_err(),
            VaultError::UnstakeFailed.into()
        );
        assert!(watch.require_received(99, VaultError::UnstakeFailed).is_ok());
    }

    #[test]
    fn test_partial_stake_pull_rejected() {
        let key = Pubkey::new_unique();
        let owner = anchor_spl::token::ID;
        let mut lamports = 0u64;
        let mut data = token_data(1_000);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let watch = BalanceWatch::start(&info).unwrap();
        // pool takes 600 of a 1_000 stake
        set_amount(&info, 400);

        assert_eq!(
            watch.require_spent(1_000, VaultError::StakeFailed).unwrap_err(),
            VaultError::StakeFailed.into()
        );
        assert!(watch.require_spent(600, VaultError::StakeFailed).is_ok());
    }

    #[test]
    fn test_untouched_balance_fails_exact_checks() {
        let key = Pubkey::new_unique();
        let owner = anchor_spl::token::ID;
        let mut lamports = 0u64;
        let mut data = token_data(7);
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);

        let watch = BalanceWatch::start(&info).unwrap();

        assert_eq!(watch.received().unwrap(), Some(0));
        assert_eq!(
            watch.require_spent(5, VaultError::StakeFailed).unwrap_err(),
            VaultError::StakeFailed.into()
        );
    }
}
