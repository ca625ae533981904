use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::state::DepositorPosition;

/// Per-depositor withdrawal gate
///
/// Every deposit restarts the full window for the whole balance, so small
/// top-ups cannot be used to stagger unlocks.
#[derive(Clone, Copy, Debug)]
pub struct LockSchedule {
    lock_duration: i64,
}

impl LockSchedule {
    pub fn new(lock_duration: i64) -> Self {
        Self { lock_duration }
    }

    pub fn lock_duration(&self) -> i64 {
        self.lock_duration
    }

    pub fn unlock_time(&self, now: i64) -> Result<i64> {
        now.checked_add(self.lock_duration)
            .ok_or(error!(VaultError::MathOverflow))
    }

    pub(crate) fn extend_lock(&self, position: &mut DepositorPosition, now: i64) -> Result<i64> {
        position.unlock_at = self.unlock_time(now)?;
        Ok(position.unlock_at)
    }

    pub fn is_unlocked(&self, position: &DepositorPosition, now: i64) -> bool {
        now >= position.unlock_at
    }

    /// Seconds left until the position unlocks
    pub fn remaining(&self, position: &DepositorPosition, now: i64) -> i64 {
        position.unlock_at.saturating_sub(now).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_LOCK_DURATION;

    fn position() -> DepositorPosition {
        DepositorPosition {
            vault: Pubkey::default(),
            owner: Pubkey::default(),
            share_balance: 0,
            unlock_at: 0,
            last_deposit_at: 0,
            bump: 0,
        }
    }

    #[test]
    fn test_fresh_position_is_unlocked() {
        let schedule = LockSchedule::new(DEFAULT_LOCK_DURATION);
        assert!(schedule.is_unlocked(&position(), 0));
    }

    #[test]
    fn test_unlock_boundary() {
        let schedule = LockSchedule::new(DEFAULT_LOCK_DURATION);
        let mut p = position();
        let now = 1_700_000_000;

        let unlock_at = schedule.extend_lock(&mut p, now).unwrap();
        assert_eq!(unlock_at, now + 7 * 86_400);
        assert!(!schedule.is_unlocked(&p, unlock_at - 1));
        assert!(schedule.is_unlocked(&p, unlock_at));
        assert_eq!(schedule.remaining(&p, now), DEFAULT_LOCK_DURATION);
        assert_eq!(schedule.remaining(&p, unlock_at + 5), 0);
    }

    #[test]
    fn test_extend_overwrites_not_accumulates() {
        let schedule = LockSchedule::new(100);
        let mut p = position();

        schedule.extend_lock(&mut p, 1_000).unwrap();
        schedule.extend_lock(&mut p, 1_090).unwrap();
        assert_eq!(p.unlock_at, 1_190);

        // an earlier timestamp still overwrites
        schedule.extend_lock(&mut p, 1_050).unwrap();
        assert_eq!(p.unlock_at, 1_150);
    }

    #[test]
    fn test_extend_overflow() {
        let schedule = LockSchedule::new(100);
        let mut p = position();
        assert!(schedule.extend_lock(&mut p, i64::MAX).is_err());
        assert_eq!(p.unlock_at, 0);
    }
}
