//! Task-tracking REST backend
//!
//! A small to-do service: task CRUD, completion state transitions, filtered
//! queries (pending, completed, by priority, search, date ranges), aggregate
//! statistics, and bulk operations, exposed over REST with JSON bodies and
//! persisted in SQLite.
//!
//! Layering, bottom up:
//! - [`db`] stores task records and answers filtered/sorted queries.
//! - [`service`] owns validation, defaulting, and state-transition rules.
//! - [`api`] maps HTTP verbs and paths to service calls and domain errors to
//!   status codes.

pub mod api;
pub mod config;
pub mod db;
pub mod service;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
