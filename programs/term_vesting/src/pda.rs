//! Deterministic address derivation.
//!
//! Every record the program owns lives at an address computed from fixed
//! seeds, so clients and the program find the same accounts without a lookup.
//! The seed constants here are the same ones the instruction contexts use in
//! their `seeds = [...]` constraints.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;

/// Find the canonical program address and bump for `seeds`.
///
/// Searches bumps from 255 down; fails with `AddressDerivationFailed` if no
/// bump yields an off-curve address.
pub fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    Pubkey::try_find_program_address(seeds, program_id)
        .ok_or_else(|| error!(StakingError::AddressDerivationFailed))
}

/// Distributor token account for one admin/token/lock-duration combination.
pub fn distributor_address(
    staking_token: &Pubkey,
    admin: &Pubkey,
    lock_duration: i64,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive(
        &[
            DISTRIBUTOR_SEED,
            staking_token.as_ref(),
            admin.as_ref(),
            &lock_duration.to_le_bytes(),
        ],
        program_id,
    )
}

pub fn stake_record_address(
    pool: &Pubkey,
    term: &Pubkey,
    investor: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive(
        &[STAKE_SEED, pool.as_ref(), term.as_ref(), investor.as_ref()],
        program_id,
    )
}

pub fn pending_withdrawal_address(
    pool: &Pubkey,
    term: &Pubkey,
    investor: &Pubkey,
    program_id: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive(
        &[
            WITHDRAW_REWARD_SEED,
            pool.as_ref(),
            term.as_ref(),
            investor.as_ref(),
        ],
        program_id,
    )
}

/// Key-less authority over the distributor account.
pub fn vault_authority_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    derive(&[VAULT_AUTHORITY_SEED], program_id)
}
