//! Password hashing.
//!
//! Thin wrapper around bcrypt so call sites never touch the primitive
//! directly. Salt and cost are embedded in the produced hash, so `verify`
//! needs no parameters beyond the candidate and the stored value.

use crate::error::AppError;

/// Hash a plaintext password with a per-call random salt.
pub fn hash(senha: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(senha, cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a plaintext candidate against a stored hash.
///
/// Returns `Ok(false)` for a mismatch; `Err` only when the stored value is
/// not a parseable bcrypt hash.
pub fn verify(candidate: &str, stored_hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(candidate, stored_hash)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}
