//! Stake instruction handler.
//!
//! Moves tokens from the investor into the pool treasury and records the
//! principal on the investor's stake record.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Staked;
use crate::state::{PendingWithdrawal, StakeRecord, StakingPool, StakingTerm};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The investor staking tokens.
    #[account(mut)]
    pub investor: Signer<'info>,

    #[account(
        mut,
        has_one = treasury @ StakingError::TreasuryMismatch
    )]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(has_one = pool @ StakingError::InvalidStakingTerm)]
    pub term: Box<Account<'info, StakingTerm>>,

    /// Investor's stake record (created on first stake).
    #[account(
        init_if_needed,
        payer = investor,
        space = StakeRecord::LEN,
        seeds = [STAKE_SEED, pool.key().as_ref(), term.key().as_ref(), investor.key().as_ref()],
        bump
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    /// Investor's pending reward balance (created on first stake).
    #[account(
        init_if_needed,
        payer = investor,
        space = PendingWithdrawal::LEN,
        seeds = [WITHDRAW_REWARD_SEED, pool.key().as_ref(), term.key().as_ref(), investor.key().as_ref()],
        bump
    )]
    pub pending_withdrawal: Box<Account<'info, PendingWithdrawal>>,

    #[account(
        mut,
        constraint = investor_token_account.owner == investor.key() @ StakingError::InvalidTokenAccountOwnership,
        constraint = investor_token_account.mint == pool.staking_token @ StakingError::MintMismatch
    )]
    pub investor_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub treasury: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Stake tokens into the term.
///
/// A repeat stake first settles the reward accrued since the last checkpoint
/// into the pending balance, then adds the new principal and restarts the lock.
pub fn handler(ctx: Context<Stake>, amount: u64) -> Result<()> {
    let pool = &ctx.accounts.pool;
    let term = &ctx.accounts.term;
    let stake_record = &ctx.accounts.stake_record;
    let now = Clock::get()?.unix_timestamp;

    require!(!pool.paused, StakingError::StakingPaused);
    require!(amount > 0, StakingError::ZeroAmount);
    require!(term.is_join_open(now), StakingError::WindowClosed);

    let is_new_investor = !stake_record.is_active();
    if is_new_investor {
        require!(
            pool.has_free_slot(term.total_slots),
            StakingError::SlotsExhausted
        );
    }

    let principal = stake_record.principal_after_stake(amount, term.minimum_stake)?;
    let pool_total = pool.total_after_stake(amount, term.capacity_cap)?;
    let settled = stake_record.accrued_since_checkpoint(term, now)?;

    require!(
        ctx.accounts.investor_token_account.amount >= amount,
        StakingError::InsufficientInvestorBalance
    );

    // Transfer tokens from investor to treasury
    let cpi_accounts = Transfer {
        from: ctx.accounts.investor_token_account.to_account_info(),
        to: ctx.accounts.treasury.to_account_info(),
        authority: ctx.accounts.investor.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    let lock_duration = term.lock_duration;
    let pool_key = ctx.accounts.pool.key();
    let term_key = ctx.accounts.term.key();
    let investor_key = ctx.accounts.investor.key();

    let pending = &mut ctx.accounts.pending_withdrawal;
    if is_new_investor {
        pending.owner = investor_key;
        pending.pending_rewards = 0;
        pending.total_claimed = 0;
        pending.bump = ctx.bumps.pending_withdrawal;
    }
    pending.credit(settled)?;

    let stake_record = &mut ctx.accounts.stake_record;
    if is_new_investor {
        stake_record.owner = investor_key;
        stake_record.pool = pool_key;
        stake_record.term = term_key;
        stake_record.bump = ctx.bumps.stake_record;
    }
    stake_record.apply_stake(principal, lock_duration, now)?;

    let pool = &mut ctx.accounts.pool;
    pool.total_staked = pool_total;
    if is_new_investor {
        pool.staker_count = pool.staker_count.saturating_add(1);
    }

    msg!("Staked {} tokens", amount);
    msg!("Principal: {}, unlocks at {}", stake_record.principal, stake_record.lock_expires_at);
    if settled > 0 {
        msg!("Settled {} scaled reward before top-up", settled);
    }

    emit!(Staked {
        pool: pool_key,
        investor: investor_key,
        amount,
        principal: stake_record.principal,
        lock_expires_at: stake_record.lock_expires_at,
        timestamp: now,
    });

    Ok(())
}
