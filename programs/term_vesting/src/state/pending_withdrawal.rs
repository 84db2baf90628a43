use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::math;

#[account]
pub struct PendingWithdrawal {
    pub owner: Pubkey,

    /// Harvested, unclaimed rewards scaled by `REWARD_PRECISION`.
    pub pending_rewards: u128,
    pub total_claimed: u64,

    pub bump: u8,
}

impl PendingWithdrawal {
    pub const LEN: usize = 8 + 32 + 16 + 8 + 1;

    pub fn credit(&mut self, reward: u128) -> Result<()> {
        self.pending_rewards = self
            .pending_rewards
            .checked_add(reward)
            .ok_or(StakingError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Token units a claim would pay right now.
    ///
    /// Fails without touching the balance if the distributor cannot cover it.
    pub fn payout(&self, distributor_balance: u64) -> Result<u64> {
        let amount = math::scaled_to_tokens(self.pending_rewards)?;
        require!(
            distributor_balance >= amount,
            StakingError::InsufficientDistributorFunds
        );
        Ok(amount)
    }

    /// Zero the pending balance after `amount` has been transferred.
    pub fn mark_claimed(&mut self, amount: u64) -> Result<()> {
        self.total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        self.pending_rewards = 0;
        Ok(())
    }
}
