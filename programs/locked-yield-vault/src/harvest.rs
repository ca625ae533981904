use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::interfaces::{RewardSink, StakingAdapter};
use crate::state::VaultState;

/// Claims pool rewards and forwards them to the treasury
///
/// Rewards bypass the share ledger entirely; the exchange rate is not raised.
pub struct HarvestEngine<'a> {
    vault: &'a mut VaultState,
}

impl<'a> HarvestEngine<'a> {
    pub fn new(vault: &'a mut VaultState) -> Self {
        Self { vault }
    }

    /// Forwards exactly what this claim realized, never a pre-existing balance
    pub fn harvest<S, R>(&mut self, adapter: &mut S, sink: &mut R, now: i64) -> Result<u64>
    where
        S: StakingAdapter,
        R: RewardSink,
    {
        require_keys_eq!(sink.recipient(), self.vault.treasury, VaultError::InvalidTreasury);

        let reward = adapter.claim()?;
        let total = self
            .vault
            .total_rewards_harvested
            .checked_add(reward)
            .ok_or(VaultError::MathOverflow)?;

        if reward > 0 {
            sink.forward(reward)?;
        }

        self.vault.total_rewards_harvested = total;
        self.vault.last_harvest_at = now;

        msg!("harvested {} reward from pool {}", reward, adapter.pool());
        Ok(reward)
    }
}
