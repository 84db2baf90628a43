use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::math;
use crate::state::{RewardPolicy, StakingTerm};

#[account]
pub struct StakeRecord {
    pub owner: Pubkey,
    pub pool: Pubkey,
    pub term: Pubkey,

    pub principal: u64,

    pub lock_expires_at: i64,
    /// Accrual checkpoint: the next harvest counts time from here.
    pub last_accrual_at: i64,

    pub bump: u8,
}

impl StakeRecord {
    pub const LEN: usize = 8 + (32 * 3) + 8 + (8 * 2) + 1;

    pub fn is_active(&self) -> bool {
        self.principal > 0
    }

    /// Lock expiry check, kept for a principal withdrawal instruction to use.
    pub fn is_unlocked(&self, now: i64) -> bool {
        now >= self.lock_expires_at
    }

    /// Scaled reward earned between the checkpoint and `now` under the term's policy.
    ///
    /// Does not move the checkpoint; callers do that once the reward is credited.
    pub fn accrued_since_checkpoint(&self, term: &StakingTerm, now: i64) -> Result<u128> {
        if !self.is_active() {
            return Ok(0);
        }

        let accrual_end = match term.reward_policy {
            RewardPolicy::AccrueUntilUnlock => now.min(self.lock_expires_at),
            RewardPolicy::Continuous | RewardPolicy::ClaimAfterUnlock => now,
        };
        let elapsed = accrual_end
            .checked_sub(self.last_accrual_at)
            .ok_or(StakingError::ArithmeticOverflow)?;

        math::accrue(self.principal, term.apr_bps, elapsed)
    }

    /// Principal after adding `amount`, checked against the term minimum.
    pub fn principal_after_stake(&self, amount: u64, minimum_stake: u64) -> Result<u64> {
        let principal = self
            .principal
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        require!(principal >= minimum_stake, StakingError::BelowMinimumStake);
        Ok(principal)
    }

    /// Commit a stake: new principal, fresh lock, and checkpoint at `now`.
    pub fn apply_stake(&mut self, principal: u64, lock_duration: i64, now: i64) -> Result<()> {
        let lock_expires_at = now
            .checked_add(lock_duration)
            .ok_or(StakingError::ArithmeticOverflow)?;

        self.principal = principal;
        self.lock_expires_at = lock_expires_at;
        self.last_accrual_at = now;
        Ok(())
    }
}
