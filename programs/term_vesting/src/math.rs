//! Fixed-point reward math.
//!
//! Rewards are kept scaled by [`REWARD_PRECISION`] until they are paid out, so
//! a few seconds of accrual on a small principal still registers.

use anchor_lang::prelude::*;

use crate::constants::{BASIS_POINTS_DENOMINATOR, REWARD_PRECISION, SECONDS_PER_YEAR};
use crate::error::StakingError;

/// Reward accrued by `principal` at `apr_bps` over `elapsed_seconds`, scaled
/// by [`REWARD_PRECISION`].
///
/// rewards = principal * apr * elapsed * precision / (10000 * seconds_per_year)
///
/// Negative elapsed time counts as zero.
pub fn accrue(principal: u64, apr_bps: u32, elapsed_seconds: i64) -> Result<u128> {
    accrue_scaled(principal, apr_bps, elapsed_seconds, REWARD_PRECISION)
}

/// Same as [`accrue`] with an explicit scale factor.
pub fn accrue_scaled(
    principal: u64,
    apr_bps: u32,
    elapsed_seconds: i64,
    scale: u128,
) -> Result<u128> {
    let elapsed = elapsed_seconds.max(0) as u128;
    if elapsed == 0 || principal == 0 || apr_bps == 0 {
        return Ok(0);
    }

    let base = (principal as u128)
        .checked_mul(apr_bps as u128)
        .ok_or(StakingError::ArithmeticOverflow)?
        .checked_mul(elapsed)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let denominator = (BASIS_POINTS_DENOMINATOR as u128)
        .checked_mul(SECONDS_PER_YEAR as u128)
        .ok_or(StakingError::ArithmeticOverflow)?;

    // base * scale / denominator, split so the scale never multiplies the full base
    let whole = (base / denominator)
        .checked_mul(scale)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let fraction = (base % denominator)
        .checked_mul(scale)
        .ok_or(StakingError::ArithmeticOverflow)?
        / denominator;

    whole
        .checked_add(fraction)
        .ok_or_else(|| error!(StakingError::ArithmeticOverflow))
}

/// Whole token units represented by a scaled reward, rounded down.
pub fn scaled_to_tokens(scaled: u128) -> Result<u64> {
    u64::try_from(scaled / REWARD_PRECISION).map_err(|_| error!(StakingError::ArithmeticOverflow))
}
