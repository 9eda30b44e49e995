pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use crate::models::Role;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// Must be between 3 and 32 characters, alphanumeric, and can include underscores or hyphens.
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// The user's first name.
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    /// The user's last name.
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    /// Password for the new account. No length policy is imposed; the
    /// plaintext is hashed immediately and never stored.
    pub password: String,
    /// Role for the new account (`"admin"` or `"user"`).
    /// Anything else fails deserialization before validation runs.
    pub role: Role,
}

/// Represents the form payload for a login request (`POST /auth/token`).
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    /// Username of the account to authenticate.
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    /// The account password. Unconstrained, like registration: a wrong
    /// password of any length must surface as bad credentials, not as a
    /// validation failure.
    pub password: String,
}

/// Response structure after a successful login.
/// Carries the bearer token the client must present on subsequent requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed JWT access token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
