/// Fund distributor instruction handler.
///
/// Deposits reward tokens into the distributor that claims are paid from.
///
/// ## Security Guarantees
/// - Distributor must be the pool's stored distributor PDA
/// - Mint validation prevents wrong token deposits
/// - Anyone can fund (no admin restriction)

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::error::StakingError;
use crate::events::DistributorFunded;
use crate::state::StakingPool;

/// Accounts required for funding the distributor.
#[derive(Accounts)]
pub struct FundDistributor<'info> {
    /// The funder (anyone can fund).
    pub funder: Signer<'info>,

    #[account(has_one = distributor)]
    pub pool: Box<Account<'info, StakingPool>>,

    #[account(
        mut,
        constraint = funder_token_account.mint == pool.staking_token @ StakingError::MintMismatch,
        constraint = funder_token_account.owner == funder.key() @ StakingError::InvalidTokenAccountOwnership
    )]
    pub funder_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub distributor: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Fund the distributor with reward tokens.
///
/// # Arguments
/// * `ctx` - FundDistributor accounts context
/// * `amount` - Amount of tokens to deposit
pub fn handler(ctx: Context<FundDistributor>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::ZeroAmount);

    let cpi_accounts = Transfer {
        from: ctx.accounts.funder_token_account.to_account_info(),
        to: ctx.accounts.distributor.to_account_info(),
        authority: ctx.accounts.funder.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    token::transfer(CpiContext::new(cpi_program, cpi_accounts), amount)?;

    // Reload distributor to get updated balance
    ctx.accounts.distributor.reload()?;

    msg!("Distributor funded with {} tokens", amount);
    msg!("New distributor balance: {}", ctx.accounts.distributor.amount);

    emit!(DistributorFunded {
        pool: ctx.accounts.pool.key(),
        funder: ctx.accounts.funder.key(),
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
