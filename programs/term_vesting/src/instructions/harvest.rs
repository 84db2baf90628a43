//! Harvest instruction handler.
//!
//! Moves reward accrued since the last checkpoint into the investor's pending
//! balance. No tokens move.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Harvested;
use crate::state::{load_investor_record, PendingWithdrawal, StakeRecord, StakingPool, StakingTerm};

/// Accounts required for harvesting.
#[derive(Accounts)]
pub struct Harvest<'info> {
    pub investor: Signer<'info>,

    pub pool: Box<Account<'info, StakingPool>>,

    #[account(has_one = pool @ StakingError::InvalidStakingTerm)]
    pub term: Box<Account<'info, StakingTerm>>,

    /// CHECK: Address fixed by seeds; loaded in the handler.
    #[account(
        mut,
        seeds = [STAKE_SEED, pool.key().as_ref(), term.key().as_ref(), investor.key().as_ref()],
        bump
    )]
    pub stake_record: UncheckedAccount<'info>,

    /// CHECK: Address fixed by seeds; loaded in the handler.
    #[account(
        mut,
        seeds = [WITHDRAW_REWARD_SEED, pool.key().as_ref(), term.key().as_ref(), investor.key().as_ref()],
        bump
    )]
    pub pending_withdrawal: UncheckedAccount<'info>,
}

/// Credit accrued reward and advance the accrual checkpoint to now.
///
/// Calling twice in the same second adds nothing the second time. An investor
/// who never staked gets `NotStaked`.
pub fn handler(ctx: Context<Harvest>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let investor = ctx.accounts.investor.key();

    let stake_info = ctx.accounts.stake_record.to_account_info();
    let mut stake_record = load_investor_record::<StakeRecord>(&stake_info)?;
    require!(stake_record.is_active(), StakingError::NotStaked);
    require_keys_eq!(stake_record.owner, investor, StakingError::NotStaked);

    let pending_info = ctx.accounts.pending_withdrawal.to_account_info();
    let mut pending = load_investor_record::<PendingWithdrawal>(&pending_info)?;

    let reward = stake_record.accrued_since_checkpoint(&ctx.accounts.term, now)?;

    pending.credit(reward)?;
    stake_record.last_accrual_at = now;

    stake_record.exit(&crate::ID)?;
    pending.exit(&crate::ID)?;

    msg!("Harvested {} scaled reward", reward);
    msg!("Pending rewards: {}", pending.pending_rewards);

    emit!(Harvested {
        pool: ctx.accounts.pool.key(),
        investor,
        reward,
        pending_rewards: pending.pending_rewards,
        timestamp: now,
    });

    Ok(())
}
