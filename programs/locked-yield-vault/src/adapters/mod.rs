//! On-chain implementations of the vault's external seams

pub mod balance;
pub mod depositor;
pub mod reward_pool;
pub mod token;

pub use balance::*;
pub use depositor::*;
pub use reward_pool::*;
pub use token::*;
