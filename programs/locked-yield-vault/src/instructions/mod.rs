pub mod approve;
pub mod deposit;
pub mod deposit_bpt;
pub mod harvest;
pub mod initialize;
pub mod set_treasury;
pub mod withdraw;

pub use approve::*;
pub use deposit::*;
pub use deposit_bpt::*;
pub use harvest::*;
pub use initialize::*;
pub use set_treasury::*;
pub use withdraw::*;
