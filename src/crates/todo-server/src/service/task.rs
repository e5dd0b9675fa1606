//! Task service: business rules layered over the repository
//!
//! Owns validation, defaulting, and completion state transitions. The
//! repository below it only stores and queries; everything a caller could get
//! wrong is rejected here with an explicit [`TaskError`].

use chrono::{Days, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::models::{now_rfc3339, Priority, Task};
use crate::db::repositories::TaskRepository;
use crate::db::DatabasePool;
use crate::service::error::{TaskError, TaskResult};

/// Maximum description length in characters
const MAX_DESCRIPTION_LEN: usize = 255;

/// Maximum notes length in characters
const MAX_NOTES_LEN: usize = 500;

/// Partial update for a task.
///
/// Absent fields leave the stored values untouched. A present but blank
/// description is ignored rather than rejected; completion state is never
/// part of a patch and changes only through the dedicated operations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

/// Aggregate task statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub urgent: i64,
    pub high_priority: i64,
    pub completion_percentage: f64,
}

impl TaskStats {
    /// Build statistics from raw counts, deriving the completion percentage.
    pub fn new(total: i64, completed: i64, pending: i64, urgent: i64, high_priority: i64) -> Self {
        let completion_percentage = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            completed,
            pending,
            urgent,
            high_priority,
            completion_percentage,
        }
    }
}

/// Task service holding the database pool
#[derive(Clone)]
pub struct TaskService {
    pool: DatabasePool,
}

impl TaskService {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    // Basic CRUD

    /// Get all tasks, newest first.
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        Ok(TaskRepository::list(&self.pool).await?)
    }

    /// Get a single task by id.
    pub async fn get_task(&self, id: &str) -> TaskResult<Task> {
        TaskRepository::get_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| TaskError::not_found(id))
    }

    /// Create a new task.
    ///
    /// The description must be non-blank and at most 255 characters. Priority
    /// defaults to MEDIUM when absent; an unrecognized value is a validation
    /// error, as are notes over 500 characters.
    pub async fn create_task(
        &self,
        description: &str,
        priority: Option<&str>,
        notes: Option<&str>,
    ) -> TaskResult<Task> {
        validate_description(description)?;

        let priority = match priority {
            Some(value) => parse_priority(value)?,
            None => Priority::Medium,
        };

        let mut task = Task::new(description.to_string(), priority);
        if let Some(notes) = notes {
            validate_notes(notes)?;
            task = task.with_notes(notes);
        }

        let created = TaskRepository::insert(&self.pool, &task).await?;
        tracing::info!("Created task: {}", created.id);
        Ok(created)
    }

    /// Apply a partial update to a task.
    ///
    /// Only present fields are applied (see [`TaskPatch`]); `updated_at` is
    /// refreshed even when the patch is empty.
    pub async fn update_task(&self, id: &str, patch: TaskPatch) -> TaskResult<Task> {
        let mut task = self.get_task(id).await?;

        if let Some(description) = &patch.description {
            if !description.trim().is_empty() {
                validate_description(description)?;
                task.description = description.clone();
            }
        }
        if let Some(priority) = &patch.priority {
            task.priority = parse_priority(priority)?;
        }
        if let Some(notes) = &patch.notes {
            validate_notes(notes)?;
            task.notes = Some(notes.clone());
        }
        task.updated_at = now_rfc3339();

        TaskRepository::update(&self.pool, &task).await?;
        tracing::info!("Updated task: {}", task.id);
        Ok(task)
    }

    /// Delete a task by id.
    pub async fn delete_task(&self, id: &str) -> TaskResult<()> {
        if !TaskRepository::exists(&self.pool, id).await? {
            return Err(TaskError::not_found(id));
        }
        TaskRepository::delete(&self.pool, id).await?;
        tracing::info!("Deleted task: {}", id);
        Ok(())
    }

    // Completion state transitions

    /// Mark a task as completed, stamping `completed_at`.
    ///
    /// Other fields are left untouched apart from `updated_at`.
    pub async fn complete_task(&self, id: &str) -> TaskResult<Task> {
        let mut task = self.get_task(id).await?;
        let now = now_rfc3339();
        task.completed = true;
        task.completed_at = Some(now.clone());
        task.updated_at = now;

        TaskRepository::update(&self.pool, &task).await?;
        tracing::info!("Completed task: {}", task.id);
        Ok(task)
    }

    /// Mark a task as pending again, clearing `completed_at`.
    pub async fn uncomplete_task(&self, id: &str) -> TaskResult<Task> {
        let mut task = self.get_task(id).await?;
        task.completed = false;
        task.completed_at = None;
        task.updated_at = now_rfc3339();

        TaskRepository::update(&self.pool, &task).await?;
        tracing::info!("Reopened task: {}", task.id);
        Ok(task)
    }

    /// Change the priority of a task.
    ///
    /// The priority string is validated before the task is looked up.
    pub async fn change_priority(&self, id: &str, priority: &str) -> TaskResult<Task> {
        let priority = parse_priority(priority)?;

        let mut task = self.get_task(id).await?;
        task.priority = priority;
        task.updated_at = now_rfc3339();

        TaskRepository::update(&self.pool, &task).await?;
        tracing::info!("Changed priority of task {} to {}", task.id, priority);
        Ok(task)
    }

    // Filtered queries

    /// All pending tasks.
    pub async fn pending_tasks(&self) -> TaskResult<Vec<Task>> {
        Ok(TaskRepository::list_by_completed(&self.pool, false).await?)
    }

    /// All completed tasks.
    pub async fn completed_tasks(&self) -> TaskResult<Vec<Task>> {
        Ok(TaskRepository::list_by_completed(&self.pool, true).await?)
    }

    /// Tasks with the given priority.
    pub async fn tasks_by_priority(&self, priority: Priority) -> TaskResult<Vec<Task>> {
        Ok(TaskRepository::list_by_priority(&self.pool, priority).await?)
    }

    /// Case-insensitive description search.
    pub async fn search_tasks(&self, term: &str) -> TaskResult<Vec<Task>> {
        Ok(TaskRepository::search_description(&self.pool, term).await?)
    }

    /// Pending tasks ordered by priority rank, then creation time ascending.
    pub async fn pending_tasks_by_priority(&self) -> TaskResult<Vec<Task>> {
        Ok(TaskRepository::list_pending_ordered(&self.pool).await?)
    }

    /// Pending URGENT and HIGH tasks in rank order.
    pub async fn urgent_tasks(&self) -> TaskResult<Vec<Task>> {
        Ok(TaskRepository::list_urgent_and_high(&self.pool).await?)
    }

    /// Tasks created during the current UTC calendar day.
    ///
    /// Start of day inclusive, next start of day exclusive.
    pub async fn tasks_created_today(&self) -> TaskResult<Vec<Task>> {
        let today = Utc::now().date_naive();
        let start = today.and_time(NaiveTime::MIN).and_utc().to_rfc3339();
        let end = (today + Days::new(1))
            .and_time(NaiveTime::MIN)
            .and_utc()
            .to_rfc3339();

        Ok(TaskRepository::list_created_between(&self.pool, &start, &end).await?)
    }

    /// Tasks completed within the last `days` days.
    ///
    /// `days` must be positive; the transport layer enforces its upper bound.
    pub async fn recently_completed(&self, days: i64) -> TaskResult<Vec<Task>> {
        if days < 1 {
            return Err(TaskError::validation("days must be a positive integer"));
        }
        let since = (Utc::now() - chrono::Duration::days(days)).to_rfc3339();

        Ok(TaskRepository::list_completed_since(&self.pool, &since).await?)
    }

    // Statistics

    /// Aggregate counts and completion percentage.
    pub async fn stats(&self) -> TaskResult<TaskStats> {
        let total = TaskRepository::count(&self.pool).await?;
        let completed = TaskRepository::count_by_completed(&self.pool, true).await?;
        let pending = TaskRepository::count_by_completed(&self.pool, false).await?;
        let urgent = TaskRepository::count_by_priority(&self.pool, Priority::Urgent).await?;
        let high_priority = TaskRepository::count_by_priority(&self.pool, Priority::High).await?;

        Ok(TaskStats::new(total, completed, pending, urgent, high_priority))
    }

    // Bulk operations
    //
    // These read the matching set and then write it back. Under concurrent
    // writers that is a lost-update race; single-writer use is assumed.

    /// Mark every pending task as completed, all sharing one timestamp.
    ///
    /// # Returns
    /// Number of tasks that were transitioned.
    pub async fn mark_all_completed(&self) -> TaskResult<u64> {
        let pending = TaskRepository::list_by_completed(&self.pool, false).await?;
        let now = now_rfc3339();

        let mut updated = 0;
        for mut task in pending {
            task.completed = true;
            task.completed_at = Some(now.clone());
            task.updated_at = now.clone();
            updated += TaskRepository::update(&self.pool, &task).await?;
        }

        tracing::info!("Marked {} tasks as completed", updated);
        Ok(updated)
    }

    /// Delete every completed task.
    ///
    /// # Returns
    /// Number of tasks removed.
    pub async fn delete_completed_tasks(&self) -> TaskResult<u64> {
        let removed = TaskRepository::delete_completed(&self.pool).await?;
        tracing::info!("Deleted {} completed tasks", removed);
        Ok(removed)
    }

    /// Insert a fixed set of six demo tasks.
    ///
    /// A development convenience for populating an empty database.
    pub async fn create_sample_tasks(&self) -> TaskResult<Vec<Task>> {
        let samples = [
            ("Study the Axum web framework", Priority::High),
            ("Build out the complete REST API", Priority::Urgent),
            ("Write the project documentation", Priority::Medium),
            ("Add unit tests", Priority::High),
            ("Review open pull requests", Priority::Low),
            ("Deploy the application", Priority::Medium),
        ];

        let mut created = Vec::with_capacity(samples.len());
        for (description, priority) in samples {
            let task = Task::new(description.to_string(), priority);
            created.push(TaskRepository::insert(&self.pool, &task).await?);
        }

        tracing::info!("Seeded {} sample tasks", created.len());
        Ok(created)
    }
}

/// Reject blank or over-long descriptions.
fn validate_description(description: &str) -> TaskResult<()> {
    if description.trim().is_empty() {
        return Err(TaskError::validation("description cannot be empty"));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(TaskError::validation(format!(
            "description must be between 1 and {} characters",
            MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}

/// Reject over-long notes.
fn validate_notes(notes: &str) -> TaskResult<()> {
    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(TaskError::validation(format!(
            "notes cannot exceed {} characters",
            MAX_NOTES_LEN
        )));
    }
    Ok(())
}

/// Parse a priority string, mapping unknown values to a validation error.
fn parse_priority(value: &str) -> TaskResult<Priority> {
    Priority::parse(value).ok_or_else(|| {
        TaskError::validation(format!(
            "unknown priority '{}': expected LOW, MEDIUM, HIGH or URGENT",
            value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_description_blank() {
        assert!(validate_description("").is_err());
        assert!(validate_description("   ").is_err());
        assert!(validate_description("ok").is_ok());
    }

    #[test]
    fn test_validate_description_length() {
        let long = "x".repeat(256);
        assert!(validate_description(&long).is_err());
        let max = "x".repeat(255);
        assert!(validate_description(&max).is_ok());
    }

    #[test]
    fn test_validate_notes_length() {
        let long = "x".repeat(501);
        assert!(validate_notes(&long).is_err());
        let max = "x".repeat(500);
        assert!(validate_notes(&max).is_ok());
    }

    #[test]
    fn test_parse_priority_rejects_unknown() {
        assert!(matches!(
            parse_priority("critical"),
            Err(TaskError::Validation(_))
        ));
        assert_eq!(parse_priority("urgent").unwrap(), Priority::Urgent);
    }

    #[test]
    fn test_stats_percentage() {
        let stats = TaskStats::new(3, 1, 2, 0, 0);
        assert!((stats.completion_percentage - 100.0 / 3.0).abs() < 1e-9);

        let empty = TaskStats::new(0, 0, 0, 0, 0);
        assert_eq!(empty.completion_percentage, 0.0);
    }
}
