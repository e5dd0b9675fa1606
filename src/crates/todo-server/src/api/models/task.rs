//! Task API request models
//!
//! Request bodies and query parameters for task endpoints. Tasks and stats
//! are serialized directly from the domain types; there is no response
//! envelope.

use serde::{Deserialize, Serialize};

use crate::service::TaskPatch;

/// Request to create a new task
///
/// `description` is optional at the deserialization level so that a missing
/// field reaches the service and is rejected as a validation error (400)
/// instead of failing extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    /// Task description (required, 1-255 characters)
    pub description: Option<String>,

    /// Priority name, defaults to MEDIUM when absent
    pub priority: Option<String>,

    /// Optional notes, up to 500 characters
    pub notes: Option<String>,
}

/// Request to update an existing task
///
/// Absent fields leave the stored values untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub description: Option<String>,
    pub priority: Option<String>,
    pub notes: Option<String>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            description: self.description,
            priority: self.priority,
            notes: self.notes,
        }
    }
}

/// Request body for PATCH /tasks/:id/priority
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePriorityRequest {
    /// Priority name; missing or unrecognized values are rejected
    pub priority: Option<String>,
}

/// Query parameters for GET /tasks/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Query parameters for GET /tasks/recently-completed
#[derive(Debug, Clone, Deserialize)]
pub struct RecentlyCompletedQuery {
    /// Look-back window in days, defaults to 7, accepted range [1, 365]
    pub days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserializes_without_optionals() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"description": "Walk the dog"}"#).unwrap();
        assert_eq!(req.description.as_deref(), Some("Walk the dog"));
        assert!(req.priority.is_none());
        assert!(req.notes.is_none());
    }

    #[test]
    fn test_create_request_allows_missing_description() {
        // Rejected later by validation, not by deserialization
        let req: CreateTaskRequest = serde_json::from_str("{}").unwrap();
        assert!(req.description.is_none());
    }

    #[test]
    fn test_update_request_into_patch() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"notes": "remember the leash"}"#).unwrap();
        let patch = req.into_patch();
        assert!(patch.description.is_none());
        assert!(patch.priority.is_none());
        assert_eq!(patch.notes.as_deref(), Some("remember the leash"));
    }

    #[test]
    fn test_change_priority_request_allows_missing_value() {
        let req: ChangePriorityRequest = serde_json::from_str("{}").unwrap();
        assert!(req.priority.is_none());
    }
}
