use crate::error::AppError;
use crate::models::{NewUser, User};
use sqlx::PgPool;

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, password_hash, is_active, role";

/// Inserts a new user record. New users are active by default.
///
/// Username uniqueness is enforced by the database constraint; a violation
/// surfaces as `AppError::Conflict` rather than a generic database error.
pub async fn create(pool: &PgPool, new_user: NewUser) -> Result<User, AppError> {
    let sql = format!(
        "INSERT INTO users (username, email, first_name, last_name, password_hash, is_active, role) \
         VALUES ($1, $2, $3, $4, $5, TRUE, $6) \
         RETURNING {}",
        USER_COLUMNS
    );

    sqlx::query_as::<_, User>(&sql)
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
                format!("Username '{}' is already registered", new_user.username),
            ),
            _ => e.into(),
        })
}

/// Looks up a user by username. Returns `None` when no such user exists.
pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}
