use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the role of a user account.
/// Corresponds to the `user_role` SQL enum.
///
/// A closed enumeration rather than a free-form string, so role checks
/// cannot silently pass on a typo.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May list tasks across all users.
    Admin,
    /// Ordinary account; sees only its own tasks.
    User,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Represents a user entity as stored in the database.
///
/// The password hash is never serialized into API responses.
#[derive(Debug, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub role: Role,
}

/// Fields required to insert a new user record.
/// The password arrives here already hashed; plaintext never reaches the store.
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: Role,
}
