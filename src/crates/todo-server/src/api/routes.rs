//! API route definitions
//!
//! Defines all API routes and their associated handler functions. Static
//! segments such as `/tasks/pending` coexist with the `/tasks/:id` capture;
//! the router resolves statics first.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::api::{handlers, middleware};
use crate::db::DatabaseConnection;
use crate::service::TaskService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tasks: TaskService,
}

/// Build the complete API router
pub fn create_router(db: DatabaseConnection) -> Router {
    let state = AppState {
        tasks: TaskService::new(db.pool().clone()),
        db,
    };

    Router::new()
        // Health check endpoints
        .route("/health", get(handlers::health))
        .route("/health/db", get(handlers::health_db))
        // Task CRUD
        .route("/tasks", get(handlers::list_tasks).post(handlers::create_task))
        // Filtered queries and bulk operations; registered before the :id
        // capture so their paths stay unambiguous to a reader
        .route("/tasks/pending", get(handlers::pending_tasks))
        .route("/tasks/pending/by-priority", get(handlers::pending_by_priority))
        .route(
            "/tasks/completed",
            get(handlers::completed_tasks).delete(handlers::delete_completed_tasks),
        )
        .route("/tasks/priority/:priority", get(handlers::tasks_by_priority))
        .route("/tasks/search", get(handlers::search_tasks))
        .route("/tasks/urgent", get(handlers::urgent_tasks))
        .route("/tasks/today", get(handlers::tasks_created_today))
        .route("/tasks/recently-completed", get(handlers::recently_completed))
        .route("/tasks/stats", get(handlers::task_stats))
        .route("/tasks/complete-all", patch(handlers::complete_all))
        .route("/tasks/sample-data", post(handlers::create_sample_tasks))
        // Single-task routes
        .route(
            "/tasks/:id",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/tasks/:id/complete", patch(handlers::complete_task))
        .route("/tasks/:id/uncomplete", patch(handlers::uncomplete_task))
        .route("/tasks/:id/priority", patch(handlers::change_priority))
        .layer(middleware::logging_layer())
        .layer(middleware::cors_layer())
        .with_state(state)
}
