//! Instruction handlers for the Term Vesting program.

pub mod admin;
pub mod claim_pending_reward;
pub mod fund_distributor;
pub mod harvest;
pub mod initialize;
pub mod stake;

pub use admin::*;
pub use claim_pending_reward::*;
pub use fund_distributor::*;
pub use harvest::*;
pub use initialize::*;
pub use stake::*;
