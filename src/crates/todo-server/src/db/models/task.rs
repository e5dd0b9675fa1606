//! Task model for database persistence

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Task priority level.
///
/// Stored as TEXT (`LOW`/`MEDIUM`/`HIGH`/`URGENT`) in SQLite. Sort order is
/// defined by [`Priority::rank`], not by the string value: URGENT sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    /// Sort rank: URGENT=1, HIGH=2, MEDIUM=3, LOW=4.
    ///
    /// The same table is inlined as a SQL CASE expression in ordered queries
    /// ([`crate::db::repositories::TaskRepository`]); keep the two in sync.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Urgent => 1,
            Priority::High => 2,
            Priority::Medium => 3,
            Priority::Low => 4,
        }
    }

    /// Storage representation of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Urgent => "URGENT",
        }
    }

    /// Parse a priority from user input, case-insensitively.
    ///
    /// Returns `None` for anything outside the four recognized values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LOW" => Some(Priority::Low),
            "MEDIUM" => Some(Priority::Medium),
            "HIGH" => Some(Priority::High),
            "URGENT" => Some(Priority::Urgent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A to-do item.
///
/// # Timestamps
/// All timestamp fields are RFC3339 UTC strings due to SQLite type
/// limitations. `completed_at` is `Some` if and only if `completed` is true.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique task identifier (UUID string), assigned once at creation
    pub id: String,

    /// Task description, 1-255 characters, never blank
    pub description: String,

    /// Completion flag
    pub completed: bool,

    /// Priority level
    pub priority: Priority,

    /// Optional free-form notes, up to 500 characters
    pub notes: Option<String>,

    /// Creation timestamp, never modified after creation
    pub created_at: String,

    /// Last modification timestamp, refreshed on every mutation
    pub updated_at: String,

    /// Completion timestamp, set on complete and cleared on uncomplete
    pub completed_at: Option<String>,
}

/// Current time as an RFC3339 UTC string, the storage timestamp format.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl Task {
    /// Create a new pending task.
    ///
    /// Assigns a fresh UUID and stamps `created_at`/`updated_at` with the
    /// current time. Validation of the description happens in the service
    /// layer before this is called.
    pub fn new(description: String, priority: Priority) -> Self {
        let now = now_rfc3339();
        Self {
            id: Uuid::new_v4().to_string(),
            description,
            completed: false,
            priority,
            notes: None,
            created_at: now.clone(),
            updated_at: now,
            completed_at: None,
        }
    }

    /// Builder method to set task notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation_defaults() {
        let task = Task::new("Water the plants".to_string(), Priority::Medium);

        assert!(!task.id.is_empty());
        assert_eq!(task.description, "Water the plants");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.notes.is_none());
        assert!(task.completed_at.is_none());
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_task_with_notes() {
        let task =
            Task::new("Buy groceries".to_string(), Priority::Low).with_notes("milk, eggs");

        assert_eq!(task.notes, Some("milk, eggs".to_string()));
    }

    #[test]
    fn test_priority_rank_order() {
        assert_eq!(Priority::Urgent.rank(), 1);
        assert_eq!(Priority::High.rank(), 2);
        assert_eq!(Priority::Medium.rank(), 3);
        assert_eq!(Priority::Low.rank(), 4);
    }

    #[test]
    fn test_priority_parse_case_insensitive() {
        assert_eq!(Priority::parse("urgent"), Some(Priority::Urgent));
        assert_eq!(Priority::parse("High"), Some(Priority::High));
        assert_eq!(Priority::parse(" LOW "), Some(Priority::Low));
        assert_eq!(Priority::parse("critical"), None);
        assert_eq!(Priority::parse(""), None);
    }

    #[test]
    fn test_priority_roundtrip_str() {
        for p in [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent] {
            assert_eq!(Priority::parse(p.as_str()), Some(p));
        }
    }
}
