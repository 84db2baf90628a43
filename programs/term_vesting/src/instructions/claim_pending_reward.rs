//! Claim instruction handler.
//!
//! Pays the harvested reward out of the distributor, signed by the vault
//! authority PDA, and zeroes the pending balance.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::authority::vault_authority_seeds;
use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardClaimed;
use crate::state::{PendingWithdrawal, RewardPolicy, StakeRecord, StakingPool, StakingTerm};

/// Accounts required for claiming.
#[derive(Accounts)]
pub struct ClaimPendingReward<'info> {
    pub investor: Signer<'info>,

    #[account(has_one = distributor)]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(has_one = pool @ StakingError::InvalidStakingTerm)]
    pub term: Box<Account<'info, StakingTerm>>,

    #[account(
        seeds = [STAKE_SEED, pool.key().as_ref(), term.key().as_ref(), investor.key().as_ref()],
        bump = stake_record.bump
    )]
    pub stake_record: Box<Account<'info, StakeRecord>>,

    #[account(
        mut,
        seeds = [WITHDRAW_REWARD_SEED, pool.key().as_ref(), term.key().as_ref(), investor.key().as_ref()],
        bump = pending_withdrawal.bump,
        constraint = pending_withdrawal.owner == investor.key() @ StakingError::NotStaked
    )]
    pub pending_withdrawal: Box<Account<'info, PendingWithdrawal>>,

    /// CHECK: Key-less PDA signing for the distributor; verified by seeds.
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump = pool.vault_authority_bump)]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [
            DISTRIBUTOR_SEED,
            pool.staking_token.as_ref(),
            pool.admin.as_ref(),
            &term.lock_duration.to_le_bytes()
        ],
        bump = pool.distributor_bump
    )]
    pub distributor: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = investor_token_account.owner == investor.key() @ StakingError::InvalidTokenAccountOwnership,
        constraint = investor_token_account.mint == pool.staking_token @ StakingError::MintMismatch
    )]
    pub investor_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Claim the pending reward.
///
/// Transfers `floor(pending_rewards / 10^12)` tokens. A zero payout skips the
/// transfer but still succeeds. An underfunded distributor fails the claim and
/// leaves the pending balance for a later retry.
pub fn handler(ctx: Context<ClaimPendingReward>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    if ctx.accounts.term.reward_policy == RewardPolicy::ClaimAfterUnlock {
        require!(
            ctx.accounts.stake_record.is_unlocked(now),
            StakingError::LockPeriodActive
        );
    }

    let amount = ctx
        .accounts
        .pending_withdrawal
        .payout(ctx.accounts.distributor.amount)?;

    if amount > 0 {
        let bump = [ctx.accounts.pool.vault_authority_bump];
        let seeds = vault_authority_seeds(&bump);
        let signer_seeds = &[&seeds[..]];

        let cpi_accounts = Transfer {
            from: ctx.accounts.distributor.to_account_info(),
            to: ctx.accounts.investor_token_account.to_account_info(),
            authority: ctx.accounts.vault_authority.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
        token::transfer(cpi_ctx, amount)?;
    }

    let pending = &mut ctx.accounts.pending_withdrawal;
    pending.mark_claimed(amount)?;

    msg!("{} claimed {} reward tokens", ctx.accounts.investor.key(), amount);
    msg!("Total claimed: {}", pending.total_claimed);

    emit!(RewardClaimed {
        pool: ctx.accounts.pool.key(),
        investor: ctx.accounts.investor.key(),
        amount,
        timestamp: now,
    });

    Ok(())
}
