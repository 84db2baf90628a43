//! Program constants for the Term Vesting program.
//!
//! Seeds for every derived address, time periods, and the fixed-point
//! precision used by reward accrual.

/// Seed for deriving the distributor token account PDA
pub const DISTRIBUTOR_SEED: &[u8] = b"distributor";

/// Seed for deriving per-investor stake record PDAs
pub const STAKE_SEED: &[u8] = b"stake";

/// Seed for deriving per-investor pending reward PDAs
pub const WITHDRAW_REWARD_SEED: &[u8] = b"withdraw_reward";

/// Seed for deriving the vault authority PDA
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault-authority";

/// Number of seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Scale factor applied to pending rewards so sub-token accrual is not lost
pub const REWARD_PRECISION: u128 = 1_000_000_000_000; // 10^12
