use crate::error::AppError;
use bcrypt::{hash, verify};

// Adaptive work factor. Raising this slows brute force at the cost of login
// latency; 12 keeps hashing around the hundred-millisecond mark.
const BCRYPT_COST: u32 = 12;

/// One-way hash of a plaintext password. The salt is generated internally,
/// so hashing the same password twice yields different strings.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Password hashing failed: {}", e)))
}

/// Checks a plaintext password against a stored hash. The comparison happens
/// inside bcrypt and does not short-circuit on the first differing byte.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Password verification failed: {}", e)))
}
