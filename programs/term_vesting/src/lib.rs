//! # Term Vesting Program
//!
//! Investors lock a token in a pool for a fixed term and earn an APR-based
//! reward. Rewards move through two steps:
//!
//! - **Harvest**: reward accrued since the last checkpoint is added to a
//!   pending balance kept at 10^12 precision
//! - **Claim**: the pending balance is paid out of the distributor account,
//!   signed by the key-less vault authority PDA, and reset to zero
//!
//! ## Features
//! - One pool and term per admin/token/lock-duration combination
//! - Join window, minimum stake, capacity cap and investor slots
//! - Configurable interaction between lock expiry and rewards
//! - Checked 128-bit reward math

#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod authority;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod pda;
pub mod state;

use instructions::*;
use state::RewardPolicy;

#[program]
pub mod term_vesting {
    use super::*;

    /// Creates the pool, term, treasury and distributor.
    ///
    /// # Arguments
    /// * `minimum_stake` - Smallest principal an investor may hold
    /// * `capacity_cap` - Maximum total principal in the pool
    /// * `lock_duration` - Lock length in seconds (> 0)
    /// * `join_start` - First second staking is allowed
    /// * `join_end` - Last second staking is allowed
    /// * `reserved` - Stored, unused
    /// * `apr_bps` - Annual rate in basis points
    /// * `total_slots` - Investor limit (0 = unlimited)
    ///
    /// # Errors
    /// Returns an error if a required signer is missing or a parameter is invalid.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        ctx: Context<Initialize>,
        minimum_stake: u64,
        capacity_cap: u64,
        lock_duration: i64,
        join_start: i64,
        join_end: i64,
        reserved: i64,
        apr_bps: u32,
        total_slots: u8,
    ) -> Result<()> {
        instructions::initialize::handler(
            ctx,
            minimum_stake,
            capacity_cap,
            lock_duration,
            join_start,
            join_end,
            reserved,
            apr_bps,
            total_slots,
        )
    }

    /// Stakes tokens into the term.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Staking is paused or the join window is closed
    /// - Amount is zero or the minimum stake is not reached
    /// - The pool capacity cap or slot limit would be exceeded
    /// - The investor balance is insufficient
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Moves accrued reward into the pending balance.
    ///
    /// # Errors
    /// Returns an error if the investor has no stake.
    pub fn harvest(ctx: Context<Harvest>) -> Result<()> {
        instructions::harvest::handler(ctx)
    }

    /// Pays out the pending balance from the distributor.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The distributor cannot cover the payout
    /// - The reward policy requires an expired lock
    pub fn claim_pending_reward(ctx: Context<ClaimPendingReward>) -> Result<()> {
        instructions::claim_pending_reward::handler(ctx)
    }

    /// Deposits reward tokens into the distributor.
    ///
    /// # Errors
    /// Returns an error if amount is zero.
    pub fn fund_distributor(ctx: Context<FundDistributor>, amount: u64) -> Result<()> {
        instructions::fund_distributor::handler(ctx, amount)
    }

    /// Admin function to pause or resume staking.
    pub fn set_paused(ctx: Context<AdminControl>, paused: bool) -> Result<()> {
        instructions::admin::set_paused_handler(ctx, paused)
    }

    /// Admin function to choose how lock expiry gates accrual and claims.
    pub fn set_reward_policy(ctx: Context<AdminControl>, policy: RewardPolicy) -> Result<()> {
        instructions::admin::set_reward_policy_handler(ctx, policy)
    }
}
