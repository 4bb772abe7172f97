/// Password Hashing and Verification
///
/// Salted bcrypt digests with a fixed cost factor.

use bcrypt::{hash, verify};
use thiserror::Error;

/// bcrypt cost factor (2^10 rounds)
pub const PASSWORD_HASH_COST: u32 = 10;

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashingError(#[from] bcrypt::BcryptError);

/// Hash a password using bcrypt
///
/// # Errors
/// Returns [`HashingError`] if bcrypt fails to produce a digest
pub fn hash_password(password: &str) -> Result<String, HashingError> {
    Ok(hash(password, PASSWORD_HASH_COST)?)
}

/// Verify a password against a bcrypt digest
///
/// A malformed digest counts as a mismatch.
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    match verify(password, hashed_password) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::debug!(error = %e, "Password verification against malformed digest");
            false
        }
    }
}
