use crate::{auth::AuthenticatedUser, error::AppError, store};
use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Lists every task across all users.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of all `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `403 Forbidden`: If the token is valid but the identity is not an admin.
#[get("/todo")]
pub async fn list_all_todos(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    user.require_admin()?;

    let tasks = store::tasks::list_all(&pool).await?;

    Ok(HttpResponse::Ok().json(tasks))
}
