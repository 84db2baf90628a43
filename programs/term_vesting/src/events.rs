use anchor_lang::prelude::*;

use crate::state::RewardPolicy;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub term: Pubkey,
    pub admin: Pubkey,
    pub staking_token: Pubkey,
    pub lock_duration: i64,
    pub apr_bps: u32,
    pub capacity_cap: u64,
}

#[event]
pub struct Staked {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub amount: u64,
    pub principal: u64,
    pub lock_expires_at: i64,
    pub timestamp: i64,
}

#[event]
pub struct Harvested {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub reward: u128,
    pub pending_rewards: u128,
    pub timestamp: i64,
}

#[event]
pub struct RewardClaimed {
    pub pool: Pubkey,
    pub investor: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct DistributorFunded {
    pub pool: Pubkey,
    pub funder: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolPaused {
    pub pool: Pubkey,
    pub paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct RewardPolicyUpdated {
    pub term: Pubkey,
    pub old_policy: RewardPolicy,
    pub new_policy: RewardPolicy,
    pub timestamp: i64,
}
