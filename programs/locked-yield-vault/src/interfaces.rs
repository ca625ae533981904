use anchor_lang::prelude::*;

/// Turns the raw pool token into the yield-bearing token the pool stakes
pub trait ConversionGateway {
    /// Converts `amount` and returns the yield token actually credited to the vault
    fn convert(&mut self, amount: u64) -> Result<u64>;
}

/// Custody relationship with the external reward pool
pub trait StakingAdapter {
    fn pool(&self) -> Pubkey;

    fn stake(&mut self, amount: u64) -> Result<()>;

    /// Withdraws from the pool straight to `recipient`
    fn unstake(&mut self, amount: u64, recipient: &Pubkey) -> Result<()>;

    /// Realizes pending rewards and returns what the vault received; zero is valid
    fn claim(&mut self) -> Result<u64>;
}

/// Moves a depositor's tokens into vault custody
pub trait AssetIntake {
    /// Returns the amount the vault actually received
    fn pull(&mut self, amount: u64) -> Result<u64>;
}

/// Destination for harvested rewards
pub trait RewardSink {
    fn recipient(&self) -> Pubkey;

    fn forward(&mut self, amount: u64) -> Result<()>;
}
