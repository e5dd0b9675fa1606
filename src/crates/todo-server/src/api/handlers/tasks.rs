//! Task endpoint handlers
//!
//! One handler per route; validation that belongs to the transport (blank
//! search terms, the days upper bound, unknown priority path segments)
//! happens here, everything else is delegated to the service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::{
    error::{ApiError, ApiResult},
    models::{
        ChangePriorityRequest, CreateTaskRequest, RecentlyCompletedQuery, SearchQuery,
        UpdateTaskRequest,
    },
    routes::AppState,
};
use crate::db::models::Priority;

/// Upper bound for the recently-completed look-back window, in days
const MAX_RECENT_DAYS: i64 = 365;

/// List all tasks
///
/// GET /tasks
pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<impl axum::response::IntoResponse> {
    let tasks = state.tasks.list_tasks().await?;
    Ok(Json(tasks))
}

/// Get a single task by ID
///
/// GET /tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let task = state.tasks.get_task(&id).await?;
    Ok(Json(task))
}

/// Create a new task
///
/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let description = req.description.as_deref().unwrap_or("");
    let task = state
        .tasks
        .create_task(description, req.priority.as_deref(), req.notes.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update description, priority, and/or notes of a task
///
/// PUT /tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let task = state.tasks.update_task(&id, req.into_patch()).await?;
    Ok(Json(task))
}

/// Delete a task
///
/// DELETE /tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    state.tasks.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Mark a task as completed
///
/// PATCH /tasks/:id/complete
pub async fn complete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let task = state.tasks.complete_task(&id).await?;
    Ok(Json(task))
}

/// Mark a task as pending again
///
/// PATCH /tasks/:id/uncomplete
pub async fn uncomplete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let task = state.tasks.uncomplete_task(&id).await?;
    Ok(Json(task))
}

/// Change the priority of a task
///
/// PATCH /tasks/:id/priority
pub async fn change_priority(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChangePriorityRequest>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let priority = req
        .priority
        .ok_or_else(|| ApiError::BadRequest("priority is required".to_string()))?;
    let task = state.tasks.change_priority(&id, &priority).await?;
    Ok(Json(task))
}

/// List pending tasks
///
/// GET /tasks/pending
pub async fn pending_tasks(State(state): State<AppState>) -> ApiResult<impl axum::response::IntoResponse> {
    let tasks = state.tasks.pending_tasks().await?;
    Ok(Json(tasks))
}

/// List completed tasks
///
/// GET /tasks/completed
pub async fn completed_tasks(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let tasks = state.tasks.completed_tasks().await?;
    Ok(Json(tasks))
}

/// List tasks with the given priority
///
/// GET /tasks/priority/:priority
pub async fn tasks_by_priority(
    State(state): State<AppState>,
    Path(priority): Path<String>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let priority = Priority::parse(&priority)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown priority '{}'", priority)))?;
    let tasks = state.tasks.tasks_by_priority(priority).await?;
    Ok(Json(tasks))
}

/// Search tasks by description substring
///
/// GET /tasks/search?q=term
pub async fn search_tasks(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let term = query.q.unwrap_or_default();
    if term.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "query parameter 'q' cannot be blank".to_string(),
        ));
    }
    let tasks = state.tasks.search_tasks(&term).await?;
    Ok(Json(tasks))
}

/// List pending tasks ordered by priority rank
///
/// GET /tasks/pending/by-priority
pub async fn pending_by_priority(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let tasks = state.tasks.pending_tasks_by_priority().await?;
    Ok(Json(tasks))
}

/// List pending URGENT and HIGH priority tasks
///
/// GET /tasks/urgent
pub async fn urgent_tasks(State(state): State<AppState>) -> ApiResult<impl axum::response::IntoResponse> {
    let tasks = state.tasks.urgent_tasks().await?;
    Ok(Json(tasks))
}

/// List tasks created during the current UTC day
///
/// GET /tasks/today
pub async fn tasks_created_today(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let tasks = state.tasks.tasks_created_today().await?;
    Ok(Json(tasks))
}

/// List tasks completed within the last N days
///
/// GET /tasks/recently-completed?days=N
pub async fn recently_completed(
    State(state): State<AppState>,
    Query(query): Query<RecentlyCompletedQuery>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let days = query.days.unwrap_or(7);
    if !(1..=MAX_RECENT_DAYS).contains(&days) {
        return Err(ApiError::BadRequest(format!(
            "days must be between 1 and {}",
            MAX_RECENT_DAYS
        )));
    }
    let tasks = state.tasks.recently_completed(days).await?;
    Ok(Json(tasks))
}

/// Aggregate task statistics
///
/// GET /tasks/stats
pub async fn task_stats(State(state): State<AppState>) -> ApiResult<impl axum::response::IntoResponse> {
    let stats = state.tasks.stats().await?;
    Ok(Json(stats))
}

/// Mark every pending task as completed
///
/// PATCH /tasks/complete-all
pub async fn complete_all(State(state): State<AppState>) -> ApiResult<impl axum::response::IntoResponse> {
    state.tasks.mark_all_completed().await?;
    Ok(StatusCode::OK)
}

/// Delete every completed task
///
/// DELETE /tasks/completed
pub async fn delete_completed_tasks(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    state.tasks.delete_completed_tasks().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Seed the database with demo tasks
///
/// POST /tasks/sample-data
pub async fn create_sample_tasks(
    State(state): State<AppState>,
) -> ApiResult<impl axum::response::IntoResponse> {
    let tasks = state.tasks.create_sample_tasks().await?;
    Ok((StatusCode::CREATED, Json(tasks)))
}
