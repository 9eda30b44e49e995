use crate::error::AppError;
use crate::models::Role;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
///
/// Tokens are self-contained: verification trusts these fields verbatim and
/// never re-checks the user directory, so a token stays valid for its
/// lifetime even if the account is deactivated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the username.
    pub sub: String,
    /// The user's unique identifier.
    pub id: i32,
    /// The user's role at the time the token was issued.
    pub role: Role,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Generates a JWT embedding the given identity claims.
///
/// The token expires `ttl` after issuance.
/// It requires the `JWT_SECRET` environment variable to be set for signing the token.
///
/// # Arguments
/// * `username` - The username, stored in the `sub` claim.
/// * `user_id` - The ID of the user for whom the token is generated.
/// * `role` - The user's role.
/// * `ttl` - How long the token remains valid.
///
/// # Returns
/// A `Result` containing the JWT string if successful.
/// Returns `AppError::InternalServerError` if `JWT_SECRET` is not set or if token encoding fails.
pub fn generate_token(
    username: &str,
    user_id: i32,
    role: Role,
    ttl: chrono::Duration,
) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::InternalServerError("Token expiry overflow".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: username.to_string(),
        id: user_id,
        role,
        exp: expiration,
    };

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
}

/// Verifies a JWT string and decodes its claims.
///
/// It requires the `JWT_SECRET` environment variable to be set for verifying the token signature.
/// Default validation checks are applied (signature, expiration).
///
/// # Arguments
/// * `token` - The JWT string to verify.
///
/// # Returns
/// A `Result` containing the decoded `Claims` if the token is valid.
/// Returns `AppError::InternalServerError` if `JWT_SECRET` is not set.
/// Returns `AppError::Unauthorized` if the token is malformed, its signature is invalid, or it has expired.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::InternalServerError("JWT_SECRET not set".into()))?;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
}
