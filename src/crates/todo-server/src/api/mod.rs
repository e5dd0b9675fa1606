//! REST API layer
//!
//! HTTP endpoints for task CRUD, completion transitions, filtered queries,
//! statistics, and bulk operations, plus health checks.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ApiResult};
pub use routes::{create_router, AppState};
