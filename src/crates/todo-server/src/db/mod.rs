//! Database module
//!
//! Provides database connectivity, the task model, the task repository, and
//! error handling for persistent storage.

pub mod connection;
pub mod error;
pub mod models;
pub mod repositories;

pub use connection::{DatabaseConnection, DatabasePool};
pub use error::{DatabaseError, DbResult};
