//! Error types for the Term Vesting program.
//!
//! Variants are grouped by concern. Anchor numbers them in declaration order
//! from 6000, so new variants go at the end to keep existing codes stable.

use anchor_lang::prelude::*;

/// Custom error codes for the Term Vesting program.
///
/// Error codes start at 6000 (Anchor's custom error offset) and follow
/// declaration order: `ZeroAmount` is 6000, `ArithmeticOverflow` is 6014.
#[error_code]
pub enum StakingError {
    // ========== Input Validation Errors ==========

    /// Cannot stake or fund with zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// Lock duration must be strictly positive.
    #[msg("Lock duration must be greater than zero")]
    InvalidLockDuration,

    /// Join window start is after its end.
    #[msg("End join time must not be before start join time")]
    InvalidJoinWindow,

    /// APR must be non-zero.
    #[msg("APR must be greater than zero")]
    InvalidApr,

    /// Capacity cap is zero or below the minimum stake.
    #[msg("Capacity cap must be non-zero and cover the minimum stake")]
    InvalidCapacity,

    // ========== Stake Policy Errors ==========

    /// Staking is paused by the pool admin.
    #[msg("Staking is currently paused")]
    StakingPaused,

    /// Current time is outside the term's join window.
    #[msg("Staking not started or already ended")]
    WindowClosed,

    /// Stake would push the pool above its capacity cap.
    #[msg("Stake exceeds the pool capacity cap")]
    CapacityExceeded,

    /// Resulting principal is below the term's minimum stake.
    #[msg("Minimum staking amount not reached")]
    BelowMinimumStake,

    /// All investor slots of the term are taken.
    #[msg("No investor slots left in this term")]
    SlotsExhausted,

    /// Investor token account cannot cover the stake.
    #[msg("Stake exceeds investor token balance")]
    InsufficientInvestorBalance,

    /// No principal is staked for this investor.
    #[msg("Investor has no active stake in this term")]
    NotStaked,

    // ========== Settlement Errors ==========

    /// Distributor cannot cover the reward payout.
    #[msg("Insufficient distributor funds for reward payout")]
    InsufficientDistributorFunds,

    /// Reward policy requires the lock to expire before claiming.
    #[msg("Lock period has not ended - cannot claim yet")]
    LockPeriodActive,

    // ========== Math Errors ==========

    /// Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    ArithmeticOverflow,

    // ========== Authorization and Addressing Errors ==========

    /// A required signer is missing from the transaction.
    #[msg("Signature verification failed")]
    SignatureVerificationFailed,

    /// Caller is not the pool admin.
    #[msg("Unauthorized: caller is not the pool admin")]
    Unauthorized,

    /// Term does not belong to the supplied pool.
    #[msg("Staking term did not match with staking pool")]
    InvalidStakingTerm,

    /// Token account is not owned by the signer.
    #[msg("Investor does not own this token account")]
    InvalidTokenAccountOwnership,

    /// Token account holds a different mint.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// Treasury account does not match the pool's treasury.
    #[msg("Wrong treasury address")]
    TreasuryMismatch,

    /// No valid bump exists for the requested seeds.
    #[msg("No valid program address found for seeds")]
    AddressDerivationFailed,
}
