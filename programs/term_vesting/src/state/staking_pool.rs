use anchor_lang::prelude::*;

use crate::error::StakingError;

#[account]
pub struct StakingPool {
    pub admin: Pubkey,
    pub staking_token: Pubkey,
    pub treasury: Pubkey,
    pub distributor: Pubkey,

    pub total_staked: u64,
    pub staker_count: u64,

    pub paused: bool,

    pub distributor_bump: u8,
    pub vault_authority_bump: u8,
}

impl StakingPool {
    pub const LEN: usize = 8 + (32 * 4) + (8 * 2) + 1 + 2;

    /// Pool total after adding `amount`, rejected if it would pass `capacity_cap`.
    pub fn total_after_stake(&self, amount: u64, capacity_cap: u64) -> Result<u64> {
        let total = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::ArithmeticOverflow)?;
        require!(total <= capacity_cap, StakingError::CapacityExceeded);
        Ok(total)
    }

    /// Whether one more investor may join, given the term's slot limit (0 = unlimited).
    pub fn has_free_slot(&self, total_slots: u8) -> bool {
        total_slots == 0 || self.staker_count < total_slots as u64
    }
}
