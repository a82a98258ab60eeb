//! Password hashing helpers around bcrypt

use crate::errors::{DomainError, DomainResult};

/// Hash a password with bcrypt at the given cost
pub fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Check a password against a stored bcrypt hash
///
/// A malformed stored hash is a server-side data problem and surfaces as an
/// error rather than a mismatch.
pub fn verify_password(password: &str, hash: &str) -> DomainResult<bool> {
    bcrypt::verify(password, hash).map_err(|e| DomainError::Internal {
        message: format!("Failed to verify password: {}", e),
    })
}
