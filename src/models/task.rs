use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating or updating a task.
/// Contains validation rules for its fields; out-of-range values are
/// rejected at the route boundary, before anything reaches the store.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TodoRequest {
    /// The title of the task.
    /// Must be at least 3 characters.
    #[validate(length(min = 3))]
    pub title: String,

    /// A description for the task.
    /// Must be between 3 and 100 characters.
    #[validate(length(min = 3, max = 100))]
    pub description: String,

    /// The priority of the task, from 1 (lowest) to 5 (highest) inclusive.
    #[validate(range(min = 1, max = 5))]
    pub priority: i32,

    /// Whether the task has been completed.
    pub complete: bool,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// A description for the task.
    pub description: String,
    /// The priority of the task (1-5).
    pub priority: i32,
    /// Whether the task has been completed.
    pub complete: bool,
    /// Identifier of the user who owns the task. Immutable for the
    /// lifetime of the task; every query against tasks filters on it.
    pub owner_id: i32,
}

impl Task {
    /// Creates a new `Task` instance from a `TodoRequest` and the owner's id.
    /// Assigns a fresh UUID.
    pub fn new(input: TodoRequest, owner_id: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            priority: input.priority,
            complete: input.complete,
            owner_id,
        }
    }
}
