use crate::{auth::AuthenticatedUser, error::AppError, models::TodoRequest, store};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Retrieves the authenticated user's tasks.
///
/// Only tasks owned by the identity in the bearer token are returned.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Task` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
#[get("/")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = store::tasks::list_for_owner(&pool, user.user_id).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Retrieves a specific task by its ID.
///
/// Lookup is owner-scoped: a task id belonging to another user yields the
/// same 404 as an id that does not exist at all.
///
/// ## Responses:
/// - `200 OK`: Returns the `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is owned by someone else.
#[get("/{id}")]
pub async fn get_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = store::tasks::get(&pool, todo_id.into_inner(), user.user_id).await?;

    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Todo not found".into())),
    }
}

/// Creates a new task owned by the authenticated user.
///
/// ## Request Body:
/// A JSON object matching `TodoRequest`:
/// - `title`: at least 3 characters.
/// - `description`: 3 to 100 characters.
/// - `priority`: integer 1 to 5 inclusive.
/// - `complete`: boolean.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If validation on `TodoRequest` fails.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    todo_data: web::Json<TodoRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    // Validate input before anything is persisted
    todo_data.validate()?;

    let task = store::tasks::create(&pool, user.user_id, todo_data.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Updates an existing task owned by the authenticated user.
///
/// Replaces title, description, priority, and completion atomically.
///
/// ## Responses:
/// - `204 No Content`: On successful update.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is owned by someone else.
/// - `422 Unprocessable Entity`: If validation on `TodoRequest` fails.
#[put("/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    todo_data: web::Json<TodoRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    store::tasks::update(
        &pool,
        todo_id.into_inner(),
        user.user_id,
        todo_data.into_inner(),
    )
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is owned by someone else.
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    store::tasks::delete(&pool, todo_id.into_inner(), user.user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
