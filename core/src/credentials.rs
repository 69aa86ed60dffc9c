//! Credential hashing helpers.
//!
//! Repositories persist whatever password representation they are handed.
//! Callers hash with [`hash_password`] before `create`/`update_password` and
//! check logins with [`verify_password`]. Reset and verification tokens are
//! stored as [`hash_token`] digests so the raw token never reaches the store.

use sha2::{Digest, Sha256};

use crate::errors::{DomainError, DomainResult};

/// bcrypt cost used for stored passwords
pub const PASSWORD_HASH_COST: u32 = bcrypt::DEFAULT_COST;

/// Hash a plaintext password with a random salt
pub fn hash_password(password: &str) -> DomainResult<String> {
    hash_password_with_cost(password, PASSWORD_HASH_COST)
}

/// Hash a plaintext password with an explicit bcrypt cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Check a plaintext password against a stored hash
///
/// A malformed stored hash is reported as an error, a mismatch as `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> DomainResult<bool> {
    bcrypt::verify(password, stored_hash).map_err(|e| DomainError::Internal {
        message: format!("Failed to verify password: {}", e),
    })
}

/// SHA-256 hex digest of a raw reset/verification token
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
