//! Persistence layer.
//!
//! Thin functions over the shared `PgPool`. Each call checks a connection out
//! of the pool for the duration of a single statement and returns it
//! unconditionally, success or failure; every mutation is one atomic
//! statement, so no explicit locking or transactions are needed here.

pub mod tasks;
pub mod users;
