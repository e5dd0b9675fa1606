//! API request/response models

pub mod health;
pub mod task;

pub use health::HealthResponse;
pub use task::{
    ChangePriorityRequest, CreateTaskRequest, RecentlyCompletedQuery, SearchQuery,
    UpdateTaskRequest,
};
