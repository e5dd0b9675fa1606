//! Service error types
//!
//! Two domain error kinds plus a database passthrough. Callers check these
//! explicitly; no panics or sentinel values.

use thiserror::Error;

use crate::db::DatabaseError;

/// Errors produced by the task service
#[derive(Debug, Error)]
pub enum TaskError {
    /// The referenced task id does not exist
    #[error("Task not found: {0}")]
    NotFound(String),

    /// Malformed input: blank description, unknown priority, out-of-range days
    #[error("{0}")]
    Validation(String),

    /// Storage failure
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl TaskError {
    /// NotFound error for a task id
    pub fn not_found(id: &str) -> Self {
        TaskError::NotFound(format!("Task with id {} not found", id))
    }

    /// Validation error with a message
    pub fn validation(msg: impl Into<String>) -> Self {
        TaskError::Validation(msg.into())
    }
}

impl From<sqlx::Error> for TaskError {
    fn from(err: sqlx::Error) -> Self {
        TaskError::Database(DatabaseError::from(err))
    }
}

/// Result type for service operations
pub type TaskResult<T> = std::result::Result<T, TaskError>;
