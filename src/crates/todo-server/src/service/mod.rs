//! Task service layer
//!
//! Business rules over the database repository: validation, defaulting, and
//! completion state transitions.

pub mod error;
pub mod task;

pub use error::{TaskError, TaskResult};
pub use task::{TaskPatch, TaskService, TaskStats};
