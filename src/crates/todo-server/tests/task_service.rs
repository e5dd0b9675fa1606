//! Integration tests for the task service layer.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use todo_server::db::models::Priority;
use todo_server::service::{TaskError, TaskPatch, TaskService};

async fn setup_service() -> TaskService {
    // Single connection: in-memory SQLite is per-connection
    let pool: SqlitePool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    TaskService::new(pool)
}

#[tokio::test]
async fn test_create_task_defaults() {
    let service = setup_service().await;

    let task = service.create_task("Water the plants", None, None).await.unwrap();

    assert_eq!(task.description, "Water the plants");
    assert_eq!(task.priority, Priority::Medium);
    assert!(!task.completed);
    assert!(task.completed_at.is_none());
    assert!(task.notes.is_none());
    assert_eq!(task.created_at, task.updated_at);
}

#[tokio::test]
async fn test_create_task_with_priority_and_notes() {
    let service = setup_service().await;

    let task = service
        .create_task("Pay rent", Some("urgent"), Some("due on the 1st"))
        .await
        .unwrap();

    assert_eq!(task.priority, Priority::Urgent);
    assert_eq!(task.notes.as_deref(), Some("due on the 1st"));
}

#[tokio::test]
async fn test_create_task_blank_description_fails() {
    let service = setup_service().await;

    assert!(matches!(
        service.create_task("", None, None).await,
        Err(TaskError::Validation(_))
    ));
    assert!(matches!(
        service.create_task("   ", None, None).await,
        Err(TaskError::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_task_unknown_priority_fails() {
    let service = setup_service().await;

    assert!(matches!(
        service.create_task("Something", Some("critical"), None).await,
        Err(TaskError::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_task_overlong_fields_fail() {
    let service = setup_service().await;

    let long_description = "x".repeat(256);
    assert!(matches!(
        service.create_task(&long_description, None, None).await,
        Err(TaskError::Validation(_))
    ));

    let long_notes = "x".repeat(501);
    assert!(matches!(
        service.create_task("ok", None, Some(&long_notes)).await,
        Err(TaskError::Validation(_))
    ));
}

#[tokio::test]
async fn test_get_missing_task_fails() {
    let service = setup_service().await;

    assert!(matches!(
        service.get_task("no-such-id").await,
        Err(TaskError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_only_notes_changes_only_notes() {
    let service = setup_service().await;

    let task = service
        .create_task("Original", Some("high"), None)
        .await
        .unwrap();

    let patch = TaskPatch {
        description: None,
        priority: None,
        notes: Some("a note".to_string()),
    };
    let updated = service.update_task(&task.id, patch).await.unwrap();

    assert_eq!(updated.description, "Original");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.notes.as_deref(), Some("a note"));
    assert!(updated.updated_at >= updated.created_at);
}

#[tokio::test]
async fn test_update_blank_description_is_ignored() {
    let service = setup_service().await;

    let task = service.create_task("Keep me", None, None).await.unwrap();

    let patch = TaskPatch {
        description: Some("   ".to_string()),
        priority: Some("low".to_string()),
        notes: None,
    };
    let updated = service.update_task(&task.id, patch).await.unwrap();

    assert_eq!(updated.description, "Keep me");
    assert_eq!(updated.priority, Priority::Low);
}

#[tokio::test]
async fn test_update_missing_task_fails() {
    let service = setup_service().await;

    assert!(matches!(
        service.update_task("no-such-id", TaskPatch::default()).await,
        Err(TaskError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_unknown_priority_fails() {
    let service = setup_service().await;

    let task = service.create_task("A task", None, None).await.unwrap();

    let patch = TaskPatch {
        description: None,
        priority: Some("sky-high".to_string()),
        notes: None,
    };
    assert!(matches!(
        service.update_task(&task.id, patch).await,
        Err(TaskError::Validation(_))
    ));
}

#[tokio::test]
async fn test_delete_task() {
    let service = setup_service().await;

    let task = service.create_task("Short-lived", None, None).await.unwrap();
    service.delete_task(&task.id).await.unwrap();

    assert!(matches!(
        service.get_task(&task.id).await,
        Err(TaskError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_missing_task_leaves_store_unchanged() {
    let service = setup_service().await;

    service.create_task("Survivor", None, None).await.unwrap();

    assert!(matches!(
        service.delete_task("no-such-id").await,
        Err(TaskError::NotFound(_))
    ));

    let remaining = service.list_tasks().await.unwrap();
    assert_eq!(remaining.len(), 1);
}

#[tokio::test]
async fn test_complete_then_uncomplete_restores_task() {
    let service = setup_service().await;

    let task = service
        .create_task("Round trip", Some("high"), Some("note"))
        .await
        .unwrap();

    let completed = service.complete_task(&task.id).await.unwrap();
    assert!(completed.completed);
    assert!(completed.completed_at.is_some());

    let reopened = service.uncomplete_task(&task.id).await.unwrap();
    assert!(!reopened.completed);
    assert!(reopened.completed_at.is_none());
    assert_eq!(reopened.description, "Round trip");
    assert_eq!(reopened.priority, Priority::High);
    assert_eq!(reopened.notes.as_deref(), Some("note"));
}

#[tokio::test]
async fn test_completed_iff_completed_at() {
    let service = setup_service().await;

    service.create_task("One", None, None).await.unwrap();
    let two = service.create_task("Two", None, None).await.unwrap();
    service.complete_task(&two.id).await.unwrap();

    for task in service.list_tasks().await.unwrap() {
        assert_eq!(task.completed, task.completed_at.is_some());
    }
}

#[tokio::test]
async fn test_complete_missing_task_fails() {
    let service = setup_service().await;

    assert!(matches!(
        service.complete_task("no-such-id").await,
        Err(TaskError::NotFound(_))
    ));
    assert!(matches!(
        service.uncomplete_task("no-such-id").await,
        Err(TaskError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_change_priority() {
    let service = setup_service().await;

    let task = service.create_task("Reprioritize", None, None).await.unwrap();
    let updated = service.change_priority(&task.id, "URGENT").await.unwrap();

    assert_eq!(updated.priority, Priority::Urgent);
}

#[tokio::test]
async fn test_change_priority_unknown_value_fails_before_lookup() {
    let service = setup_service().await;

    // Validation takes precedence over the missing id
    assert!(matches!(
        service.change_priority("no-such-id", "bogus").await,
        Err(TaskError::Validation(_))
    ));
}

#[tokio::test]
async fn test_pending_and_completed_queries() {
    let service = setup_service().await;

    let a = service.create_task("A", None, None).await.unwrap();
    service.create_task("B", None, None).await.unwrap();
    service.complete_task(&a.id).await.unwrap();

    let pending = service.pending_tasks().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].description, "B");

    let completed = service.completed_tasks().await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].description, "A");
}

#[tokio::test]
async fn test_pending_tasks_by_priority_order() {
    let service = setup_service().await;

    service.create_task("low task", Some("low"), None).await.unwrap();
    service.create_task("urgent task", Some("urgent"), None).await.unwrap();
    service.create_task("high task", Some("high"), None).await.unwrap();

    let ordered = service.pending_tasks_by_priority().await.unwrap();
    let descriptions: Vec<&str> = ordered.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, ["urgent task", "high task", "low task"]);
}

#[tokio::test]
async fn test_urgent_tasks_query() {
    let service = setup_service().await;

    service.create_task("urgent", Some("urgent"), None).await.unwrap();
    service.create_task("high", Some("high"), None).await.unwrap();
    service.create_task("medium", Some("medium"), None).await.unwrap();
    let done = service.create_task("done urgent", Some("urgent"), None).await.unwrap();
    service.complete_task(&done.id).await.unwrap();

    let urgent = service.urgent_tasks().await.unwrap();
    let descriptions: Vec<&str> = urgent.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, ["urgent", "high"]);
}

#[tokio::test]
async fn test_search_tasks() {
    let service = setup_service().await;

    service.create_task("Buy groceries", None, None).await.unwrap();
    service.create_task("Do laundry", None, None).await.unwrap();

    let hits = service.search_tasks("GROCER").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].description, "Buy groceries");
}

#[tokio::test]
async fn test_tasks_created_today_includes_fresh_task() {
    let service = setup_service().await;

    service.create_task("Fresh", None, None).await.unwrap();

    let today = service.tasks_created_today().await.unwrap();
    assert_eq!(today.len(), 1);
}

#[tokio::test]
async fn test_recently_completed() {
    let service = setup_service().await;

    let task = service.create_task("Done lately", None, None).await.unwrap();
    service.complete_task(&task.id).await.unwrap();
    service.create_task("Still open", None, None).await.unwrap();

    let recent = service.recently_completed(7).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].description, "Done lately");
}

#[tokio::test]
async fn test_recently_completed_rejects_non_positive_days() {
    let service = setup_service().await;

    assert!(matches!(
        service.recently_completed(0).await,
        Err(TaskError::Validation(_))
    ));
    assert!(matches!(
        service.recently_completed(-3).await,
        Err(TaskError::Validation(_))
    ));
}

#[tokio::test]
async fn test_stats() {
    let service = setup_service().await;

    let a = service.create_task("A", Some("urgent"), None).await.unwrap();
    service.create_task("B", Some("high"), None).await.unwrap();
    service.create_task("C", None, None).await.unwrap();
    service.complete_task(&a.id).await.unwrap();

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.urgent, 1);
    assert_eq!(stats.high_priority, 1);
    assert!((stats.completion_percentage - 100.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_stats_empty_store() {
    let service = setup_service().await;

    let stats = service.stats().await.unwrap();
    assert_eq!(stats.total, 0);
    assert_eq!(stats.completion_percentage, 0.0);
}

#[tokio::test]
async fn test_mark_all_completed_shares_one_timestamp() {
    let service = setup_service().await;

    for i in 0..3 {
        service
            .create_task(&format!("Task {}", i), None, None)
            .await
            .unwrap();
    }

    let updated = service.mark_all_completed().await.unwrap();
    assert_eq!(updated, 3);

    assert!(service.pending_tasks().await.unwrap().is_empty());

    let completed = service.completed_tasks().await.unwrap();
    assert_eq!(completed.len(), 3);
    let first_stamp = completed[0].completed_at.clone().unwrap();
    for task in &completed {
        assert_eq!(task.completed_at.as_deref(), Some(first_stamp.as_str()));
    }
}

#[tokio::test]
async fn test_delete_completed_tasks() {
    let service = setup_service().await;

    let a = service.create_task("A", None, None).await.unwrap();
    service.create_task("B", None, None).await.unwrap();
    service.complete_task(&a.id).await.unwrap();

    let removed = service.delete_completed_tasks().await.unwrap();
    assert_eq!(removed, 1);

    let remaining = service.list_tasks().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].description, "B");
}

#[tokio::test]
async fn test_create_sample_tasks() {
    let service = setup_service().await;

    let samples = service.create_sample_tasks().await.unwrap();
    assert_eq!(samples.len(), 6);

    let priorities: Vec<Priority> = samples.iter().map(|t| t.priority).collect();
    assert_eq!(
        priorities,
        [
            Priority::High,
            Priority::Urgent,
            Priority::Medium,
            Priority::High,
            Priority::Low,
            Priority::Medium,
        ]
    );
    assert!(samples.iter().all(|t| !t.completed));
}
