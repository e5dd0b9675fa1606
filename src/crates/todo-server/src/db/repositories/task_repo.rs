//! Task repository for database operations
//!
//! Every query predicate is spelled out as explicit SQL here; nothing is
//! derived from method names.

use crate::db::connection::DatabasePool;
use crate::db::models::{Priority, Task};

/// Priority ordering for sorted queries: URGENT=1, HIGH=2, MEDIUM=3, LOW=4.
///
/// Mirrors [`Priority::rank`]; literal string comparison on the priority
/// column would sort alphabetically and is never used for ordering.
const PRIORITY_RANK_CASE: &str = "CASE priority \
     WHEN 'URGENT' THEN 1 \
     WHEN 'HIGH' THEN 2 \
     WHEN 'MEDIUM' THEN 3 \
     WHEN 'LOW' THEN 4 \
     END";

/// Task repository for managing task database operations
pub struct TaskRepository;

impl TaskRepository {
    /// Insert a new task record.
    ///
    /// The caller supplies the fully-constructed task, identifier and
    /// timestamps included.
    pub async fn insert(pool: &DatabasePool, task: &Task) -> Result<Task, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, description, completed, priority, notes, created_at, updated_at, completed_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&task.id)
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.priority)
        .bind(&task.notes)
        .bind(&task.created_at)
        .bind(&task.updated_at)
        .bind(&task.completed_at)
        .fetch_one(pool)
        .await
    }

    /// Get a task by ID, or `None` when it does not exist.
    pub async fn get_by_id(pool: &DatabasePool, id: &str) -> Result<Option<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get all tasks, newest first.
    pub async fn list(pool: &DatabasePool) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// Full-record replace by id.
    ///
    /// # Returns
    /// Number of rows affected (0 when the id does not exist).
    pub async fn update(pool: &DatabasePool, task: &Task) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE tasks
             SET description = ?, completed = ?, priority = ?, notes = ?,
                 created_at = ?, updated_at = ?, completed_at = ?
             WHERE id = ?",
        )
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.priority)
        .bind(&task.notes)
        .bind(&task.created_at)
        .bind(&task.updated_at)
        .bind(&task.completed_at)
        .bind(&task.id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a task by id.
    ///
    /// # Returns
    /// Number of rows affected (0 when the id does not exist).
    pub async fn delete(pool: &DatabasePool, id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Check whether a task with the given id exists.
    pub async fn exists(pool: &DatabasePool, id: &str) -> Result<bool, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?)")
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(result.0 != 0)
    }

    /// Count all tasks.
    pub async fn count(pool: &DatabasePool) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(result.0)
    }

    /// Count tasks by completion flag.
    pub async fn count_by_completed(
        pool: &DatabasePool,
        completed: bool,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE completed = ?")
            .bind(completed)
            .fetch_one(pool)
            .await?;

        Ok(result.0)
    }

    /// Count tasks by priority.
    pub async fn count_by_priority(
        pool: &DatabasePool,
        priority: Priority,
    ) -> Result<i64, sqlx::Error> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE priority = ?")
            .bind(priority)
            .fetch_one(pool)
            .await?;

        Ok(result.0)
    }

    /// List tasks by completion flag, newest first.
    pub async fn list_by_completed(
        pool: &DatabasePool,
        completed: bool,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE completed = ? ORDER BY created_at DESC",
        )
        .bind(completed)
        .fetch_all(pool)
        .await
    }

    /// List tasks by priority, newest first.
    pub async fn list_by_priority(
        pool: &DatabasePool,
        priority: Priority,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE priority = ? ORDER BY created_at DESC",
        )
        .bind(priority)
        .fetch_all(pool)
        .await
    }

    /// List pending tasks with the given priority, newest first.
    pub async fn list_pending_by_priority(
        pool: &DatabasePool,
        priority: Priority,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE completed = 0 AND priority = ? ORDER BY created_at DESC",
        )
        .bind(priority)
        .fetch_all(pool)
        .await
    }

    /// Case-insensitive substring search over descriptions.
    ///
    /// `%` and `_` in the term are escaped so they match literally.
    pub async fn search_description(
        pool: &DatabasePool,
        term: &str,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let escaped = term
            .to_lowercase()
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{}%", escaped);
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE LOWER(description) LIKE ? ESCAPE '\\' ORDER BY created_at DESC",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    }

    /// List tasks created in `[start, end)`.
    ///
    /// Bounds are RFC3339 UTC strings; lexicographic comparison matches
    /// chronological order for the uniform storage format.
    pub async fn list_created_between(
        pool: &DatabasePool,
        start: &str,
        end: &str,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE created_at >= ? AND created_at < ? ORDER BY created_at DESC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// List tasks completed at or after the given instant.
    pub async fn list_completed_since(
        pool: &DatabasePool,
        since: &str,
    ) -> Result<Vec<Task>, sqlx::Error> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE completed = 1 AND completed_at >= ? ORDER BY completed_at DESC",
        )
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// List pending tasks ordered by priority rank, then creation time ascending.
    pub async fn list_pending_ordered(pool: &DatabasePool) -> Result<Vec<Task>, sqlx::Error> {
        let sql = format!(
            "SELECT * FROM tasks WHERE completed = 0 ORDER BY {}, created_at ASC",
            PRIORITY_RANK_CASE
        );
        sqlx::query_as::<_, Task>(&sql).fetch_all(pool).await
    }

    /// List pending URGENT and HIGH tasks ordered by priority rank, then
    /// creation time ascending.
    pub async fn list_urgent_and_high(pool: &DatabasePool) -> Result<Vec<Task>, sqlx::Error> {
        let sql = format!(
            "SELECT * FROM tasks
             WHERE completed = 0 AND priority IN ('URGENT', 'HIGH')
             ORDER BY {}, created_at ASC",
            PRIORITY_RANK_CASE
        );
        sqlx::query_as::<_, Task>(&sql).fetch_all(pool).await
    }

    /// Delete every completed task.
    ///
    /// # Returns
    /// Number of rows removed.
    pub async fn delete_completed(pool: &DatabasePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE completed = 1")
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
