//! State structures for the Term Vesting program.
//!
//! Pool and term hold configuration; stake records and pending withdrawals
//! are per-investor PDAs.

pub mod pending_withdrawal;
pub mod stake_record;
pub mod staking_pool;
pub mod staking_term;

pub use pending_withdrawal::*;
pub use stake_record::*;
pub use staking_pool::*;
pub use staking_term::*;

use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Load a per-investor record from an address the caller derived from seeds.
///
/// An address that was never initialized by this program means the investor
/// has not staked, so it reports `NotStaked` instead of Anchor's account errors.
pub fn load_investor_record<'info, T>(info: &AccountInfo<'info>) -> Result<Account<'info, T>>
where
    T: AccountSerialize + AccountDeserialize + Owner + Clone,
{
    if info.owner != &T::owner() || info.data_is_empty() {
        return err!(StakingError::NotStaked);
    }
    Account::try_from(info)
}
