use crate::error::AppError;
use crate::models::{Task, TodoRequest};
use sqlx::PgPool;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, title, description, priority, complete, owner_id";

/// Lists all tasks belonging to one user.
pub async fn list_for_owner(pool: &PgPool, owner_id: i32) -> Result<Vec<Task>, AppError> {
    let sql = format!(
        "SELECT {} FROM tasks WHERE owner_id = $1 ORDER BY id",
        TASK_COLUMNS
    );

    let tasks = sqlx::query_as::<_, Task>(&sql)
        .bind(owner_id)
        .fetch_all(pool)
        .await?;

    Ok(tasks)
}

/// Lists every task across all users. The admin gate lives with the caller,
/// not here.
pub async fn list_all(pool: &PgPool) -> Result<Vec<Task>, AppError> {
    let sql = format!("SELECT {} FROM tasks ORDER BY id", TASK_COLUMNS);

    let tasks = sqlx::query_as::<_, Task>(&sql).fetch_all(pool).await?;

    Ok(tasks)
}

/// Fetches a single task by `(task id, owner id)` jointly.
///
/// Returns `None` both when the task does not exist and when it belongs to a
/// different owner; callers cannot tell the two apart.
pub async fn get(pool: &PgPool, task_id: Uuid, owner_id: i32) -> Result<Option<Task>, AppError> {
    let sql = format!(
        "SELECT {} FROM tasks WHERE id = $1 AND owner_id = $2",
        TASK_COLUMNS
    );

    let task = sqlx::query_as::<_, Task>(&sql)
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

    Ok(task)
}

/// Inserts a new task for the given owner. Input is validated at the route
/// boundary before this is called.
pub async fn create(pool: &PgPool, owner_id: i32, input: TodoRequest) -> Result<Task, AppError> {
    let task = Task::new(input, owner_id);

    let sql = format!(
        "INSERT INTO tasks (id, title, description, priority, complete, owner_id) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {}",
        TASK_COLUMNS
    );

    let created = sqlx::query_as::<_, Task>(&sql)
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority)
        .bind(task.complete)
        .bind(task.owner_id)
        .fetch_one(pool)
        .await?;

    Ok(created)
}

/// Replaces title, description, priority, and completion of an owner's task
/// in a single statement. Fails with `NotFound` when the owner-scoped row
/// does not exist; nothing is mutated in that case.
pub async fn update(
    pool: &PgPool,
    task_id: Uuid,
    owner_id: i32,
    input: TodoRequest,
) -> Result<Task, AppError> {
    let sql = format!(
        "UPDATE tasks \
         SET title = $1, description = $2, priority = $3, complete = $4 \
         WHERE id = $5 AND owner_id = $6 \
         RETURNING {}",
        TASK_COLUMNS
    );

    let updated = sqlx::query_as::<_, Task>(&sql)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.priority)
        .bind(input.complete)
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;

    updated.ok_or_else(|| AppError::NotFound("Todo not found".into()))
}

/// Deletes an owner's task. Fails with `NotFound` under the same condition
/// as `update`.
pub async fn delete(pool: &PgPool, task_id: Uuid, owner_id: i32) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(task_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Todo not found".into()));
    }

    Ok(())
}
