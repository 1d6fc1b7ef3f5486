//! Task models and DTOs.

use serde::{Deserialize, Serialize};
use shelfsight_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Task status: open for work.
pub const TASK_PENDING: &str = "pending";
/// Task status: finished by the employee.
pub const TASK_COMPLETED: &str = "completed";

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub employee_id: DbId,
    pub shelf_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub scheduled_time: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A task joined with its shelf and planogram names, for list views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskWithShelf {
    pub id: DbId,
    pub employee_id: DbId,
    pub shelf_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub scheduled_time: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub shelf_name: String,
    pub planogram_name: String,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub employee_id: DbId,
    pub shelf_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub scheduled_time: Option<Timestamp>,
}

/// DTO for updating a task. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub scheduled_time: Option<Timestamp>,
}
