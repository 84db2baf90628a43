//! Signer and vault authority helpers.

use anchor_lang::prelude::*;

use crate::constants::VAULT_AUTHORITY_SEED;
use crate::error::StakingError;

/// Require every account in `accounts` to have signed the transaction.
///
/// Fresh pool, term, and treasury accounts are plain keypairs, so their
/// owners must prove control when they are created.
pub fn verify_signers(accounts: &[&AccountInfo]) -> Result<()> {
    for account in accounts {
        if !account.is_signer {
            msg!("Missing required signer: {}", account.key);
            return err!(StakingError::SignatureVerificationFailed);
        }
    }
    Ok(())
}

/// Only the pool admin may run administrative instructions.
pub fn assert_admin(expected: &Pubkey, actual: &Pubkey) -> Result<()> {
    require_keys_eq!(*expected, *actual, StakingError::Unauthorized);
    Ok(())
}

/// Seeds the vault authority signs with; the bump is the one stored on the
/// pool at initialization.
pub fn vault_authority_seeds(bump: &[u8; 1]) -> [&[u8]; 2] {
    [VAULT_AUTHORITY_SEED, &bump[..]]
}
