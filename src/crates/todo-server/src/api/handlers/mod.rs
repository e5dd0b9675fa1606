//! API request handlers

pub mod health;
pub mod tasks;

pub use health::{health, health_db};
pub use tasks::{
    change_priority, complete_all, complete_task, completed_tasks, create_sample_tasks,
    create_task, delete_completed_tasks, delete_task, get_task, list_tasks, pending_by_priority,
    pending_tasks, recently_completed, search_tasks, task_stats, tasks_by_priority,
    tasks_created_today, uncomplete_task, update_task, urgent_tasks,
};
