/// Admin instruction handlers.
///
/// ## Security Guarantees
/// - All admin functions require signer == pool.admin
/// - Term must belong to the pool it is administered through

use anchor_lang::prelude::*;

use crate::authority::assert_admin;
use crate::error::StakingError;
use crate::events::{PoolPaused, RewardPolicyUpdated};
use crate::state::{RewardPolicy, StakingPool, StakingTerm};

/// Accounts required for admin operations.
#[derive(Accounts)]
pub struct AdminControl<'info> {
    pub admin: Signer<'info>,

    #[account(
        mut,
        has_one = admin @ StakingError::Unauthorized
    )]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        has_one = pool @ StakingError::InvalidStakingTerm
    )]
    pub term: Box<Account<'info, StakingTerm>>,
}

/// Pause or resume new stakes. Harvest and claim stay available.
pub fn set_paused_handler(ctx: Context<AdminControl>, paused: bool) -> Result<()> {
    assert_admin(&ctx.accounts.pool.admin, &ctx.accounts.admin.key())?;

    let pool = &mut ctx.accounts.pool;
    let previous_state = pool.paused;
    pool.paused = paused;

    msg!(
        "Staking {} (was {})",
        if paused { "PAUSED" } else { "RESUMED" },
        if previous_state { "paused" } else { "active" }
    );

    emit!(PoolPaused {
        pool: pool.key(),
        paused,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Choose how lock expiry gates accrual and claiming for this term.
///
/// Applies from the next harvest or claim; already pending rewards are kept.
pub fn set_reward_policy_handler(ctx: Context<AdminControl>, policy: RewardPolicy) -> Result<()> {
    assert_admin(&ctx.accounts.pool.admin, &ctx.accounts.admin.key())?;

    let term = &mut ctx.accounts.term;
    let old_policy = term.reward_policy;
    term.reward_policy = policy;

    msg!("Reward policy: {:?} -> {:?}", old_policy, policy);

    emit!(RewardPolicyUpdated {
        term: term.key(),
        old_policy,
        new_policy: policy,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
