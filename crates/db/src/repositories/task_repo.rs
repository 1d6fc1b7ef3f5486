//! Repository for the `tasks` table.

use shelfsight_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskWithShelf, UpdateTask, TASK_PENDING};

const COLUMNS: &str = "id, employee_id, shelf_id, title, description, status, priority, \
    scheduled_time, completed_at, created_at";

/// Join selecting a task together with its shelf and planogram names.
const WITH_SHELF_SELECT: &str = "SELECT t.id, t.employee_id, t.shelf_id, t.title, t.description,
        t.status, t.priority, t.scheduled_time, t.completed_at, t.created_at,
        sh.name AS shelf_name, p.name AS planogram_name
     FROM tasks t
     JOIN shelves sh ON sh.id = t.shelf_id
     JOIN planograms p ON p.id = sh.planogram_id";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (employee_id, shelf_id, title, description, priority, scheduled_time)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'medium'), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.employee_id)
            .bind(input.shelf_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(input.scheduled_time)
            .fetch_one(pool)
            .await
    }

    /// Find a task by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks for an employee, soonest scheduled first.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<TaskWithShelf>, sqlx::Error> {
        let query = format!(
            "{WITH_SHELF_SELECT}
             WHERE t.employee_id = $1
             ORDER BY t.scheduled_time ASC NULLS LAST"
        );
        sqlx::query_as::<_, TaskWithShelf>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// List an employee's pending tasks, soonest scheduled first.
    pub async fn list_pending_for_employee(
        pool: &PgPool,
        employee_id: DbId,
    ) -> Result<Vec<TaskWithShelf>, sqlx::Error> {
        let query = format!(
            "{WITH_SHELF_SELECT}
             WHERE t.employee_id = $1 AND t.status = '{TASK_PENDING}'
             ORDER BY t.scheduled_time ASC NULLS LAST"
        );
        sqlx::query_as::<_, TaskWithShelf>(&query)
            .bind(employee_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task's editable fields. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                scheduled_time = COALESCE($5, scheduled_time)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.priority)
            .bind(input.scheduled_time)
            .fetch_optional(pool)
            .await
    }

    /// Mark a task completed, stamping `completed_at`.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = 'completed', completed_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
