//! Database models
//!
//! All timestamp fields are stored as RFC3339 strings (TEXT in SQLite) due to
//! sqlx and SQLite type limitations with chrono::DateTime<Utc>.

pub mod task;

pub use task::{now_rfc3339, Priority, Task};
