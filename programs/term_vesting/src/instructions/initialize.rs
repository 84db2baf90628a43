/// Initialize instruction handler.
///
/// Creates a staking pool, its term, the treasury, and the distributor.
///
/// ## Security Guarantees
/// - Pool, term and treasury are fresh keypairs that must sign
/// - Distributor is a PDA whose token authority is the key-less vault authority
/// - All parameters validated before storage

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::authority::verify_signers;
use crate::constants::*;
use crate::events::PoolInitialized;
use crate::state::{RewardPolicy, StakingPool, StakingTerm};

/// Accounts required for pool initialization.
///
/// ## Security Notes
/// - `distributor` seeds bind it to token + admin + lock duration
/// - `treasury` is owned by the pool, `distributor` by the vault authority
#[derive(Accounts)]
#[instruction(minimum_stake: u64, capacity_cap: u64, lock_duration: i64)]
pub struct Initialize<'info> {
    /// The admin that pays for and controls the pool.
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(init, payer = admin, space = StakingPool::LEN)]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(init, payer = admin, space = StakingTerm::LEN)]
    pub term: Box<Account<'info, StakingTerm>>,

    pub staking_token: Account<'info, Mint>,

    /// Holds staked principal.
    #[account(
        init,
        payer = admin,
        token::mint = staking_token,
        token::authority = pool,
    )]
    pub treasury: Box<Account<'info, TokenAccount>>,

    /// CHECK: Key-less PDA; only its address and bump are used.
    #[account(seeds = [VAULT_AUTHORITY_SEED], bump)]
    pub vault_authority: UncheckedAccount<'info>,

    /// Holds reward tokens paid out on claim.
    #[account(
        init,
        payer = admin,
        seeds = [
            DISTRIBUTOR_SEED,
            staking_token.key().as_ref(),
            admin.key().as_ref(),
            &lock_duration.to_le_bytes()
        ],
        bump,
        token::mint = staking_token,
        token::authority = vault_authority,
    )]
    pub distributor: Box<Account<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new staking pool and term.
///
/// # Arguments
/// * `minimum_stake` - Smallest principal an investor may hold
/// * `capacity_cap` - Maximum total principal across all investors
/// * `lock_duration` - Seconds each stake stays locked
/// * `join_start` / `join_end` - Inclusive window in which staking is allowed
/// * `reserved` - Stored on the term, unused
/// * `apr_bps` - Annual rate in basis points
/// * `total_slots` - Maximum number of investors (0 = unlimited)
#[allow(clippy::too_many_arguments)]
pub fn handler(
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
    // === INPUT VALIDATION ===

    // The create_account CPIs above already reject an unsigned pool, term or
    // treasury; this names the failure for any that get here.
    verify_signers(&[
        &ctx.accounts.admin.to_account_info(),
        &ctx.accounts.pool.to_account_info(),
        &ctx.accounts.term.to_account_info(),
        &ctx.accounts.treasury.to_account_info(),
    ])?;

    StakingTerm::validate_params(
        minimum_stake,
        capacity_cap,
        lock_duration,
        join_start,
        join_end,
        apr_bps,
    )?;

    let pool_key = ctx.accounts.pool.key();

    // === STATE INITIALIZATION ===

    let pool = &mut ctx.accounts.pool;
    pool.admin = ctx.accounts.admin.key();
    pool.staking_token = ctx.accounts.staking_token.key();
    pool.treasury = ctx.accounts.treasury.key();
    pool.distributor = ctx.accounts.distributor.key();
    pool.total_staked = 0;
    pool.staker_count = 0;
    pool.paused = false;
    pool.distributor_bump = ctx.bumps.distributor;
    pool.vault_authority_bump = ctx.bumps.vault_authority;

    let term = &mut ctx.accounts.term;
    term.pool = pool_key;
    term.minimum_stake = minimum_stake;
    term.capacity_cap = capacity_cap;
    term.lock_duration = lock_duration;
    term.join_start = join_start;
    term.join_end = join_end;
    term.reserved = reserved;
    term.apr_bps = apr_bps;
    term.total_slots = total_slots;
    term.reward_policy = RewardPolicy::Continuous;

    msg!("Term vesting pool initialized");
    msg!("Admin: {}", ctx.accounts.admin.key());
    msg!("Token: {}", ctx.accounts.staking_token.key());
    msg!("Lock: {}s, APR: {}bp, Cap: {}", lock_duration, apr_bps, capacity_cap);

    emit!(PoolInitialized {
        pool: pool_key,
        term: ctx.accounts.term.key(),
        admin: ctx.accounts.admin.key(),
        staking_token: ctx.accounts.staking_token.key(),
        lock_duration,
        apr_bps,
        capacity_cap,
    });

    Ok(())
}
