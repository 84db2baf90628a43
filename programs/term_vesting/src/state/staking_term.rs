use anchor_lang::prelude::borsh;
use anchor_lang::prelude::*;

use crate::error::StakingError;

/// How the lock duration interacts with reward accrual and claiming.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RewardPolicy {
    /// Accrue from the last checkpoint regardless of lock expiry; claim any time.
    #[default]
    Continuous,
    /// Accrual stops at the lock expiry timestamp.
    AccrueUntilUnlock,
    /// Accrue continuously, but claims wait for the lock to expire.
    ClaimAfterUnlock,
}

#[account]
pub struct StakingTerm {
    pub pool: Pubkey,

    pub minimum_stake: u64,
    pub capacity_cap: u64,

    pub lock_duration: i64,
    pub join_start: i64,
    pub join_end: i64,
    /// Stored as supplied; not read by any instruction.
    pub reserved: i64,

    pub apr_bps: u32,
    pub total_slots: u8,
    pub reward_policy: RewardPolicy,
}

impl StakingTerm {
    pub const LEN: usize = 8 + 32 + (8 * 2) + (8 * 4) + 4 + 1 + 1;

    /// Parameter checks run before any account is written.
    pub fn validate_params(
        minimum_stake: u64,
        capacity_cap: u64,
        lock_duration: i64,
        join_start: i64,
        join_end: i64,
        apr_bps: u32,
    ) -> Result<()> {
        require!(lock_duration > 0, StakingError::InvalidLockDuration);
        require!(join_start <= join_end, StakingError::InvalidJoinWindow);
        require!(apr_bps > 0, StakingError::InvalidApr);
        require!(
            capacity_cap > 0 && capacity_cap >= minimum_stake,
            StakingError::InvalidCapacity
        );
        Ok(())
    }

    pub fn is_join_open(&self, now: i64) -> bool {
        self.join_start <= now && now <= self.join_end
    }
}
