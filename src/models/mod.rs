pub mod task;
pub mod user;

pub use task::{Task, TodoRequest};
pub use user::{NewUser, Role, User};
