//! Handlers for the `/tasks` resource.
//!
//! Employees see and complete their own tasks; supervisors create and manage
//! tasks for any employee.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelfsight_core::error::CoreError;
use shelfsight_core::types::DbId;
use shelfsight_db::models::task::{CreateTask, Task, TaskWithShelf, UpdateTask};
use shelfsight_db::repositories::TaskRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSupervisor;
use crate::state::AppState;

/// GET /api/v1/tasks
///
/// List the authenticated employee's tasks, soonest scheduled first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<TaskWithShelf>>> {
    let tasks = TaskRepo::list_for_employee(&state.pool, user.profile_id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/pending
///
/// List the authenticated employee's pending tasks.
pub async fn list_pending(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<TaskWithShelf>>> {
    let tasks = TaskRepo::list_pending_for_employee(&state.pool, user.profile_id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = find_visible_task(&state, &user, id).await?;
    Ok(Json(task))
}

/// POST /api/v1/tasks (supervisor only)
pub async fn create(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Task title must not be empty".into(),
        )));
    }
    let task = TaskRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/v1/tasks/{id} (supervisor only)
pub async fn update(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "task", id }))?;
    Ok(Json(task))
}

/// POST /api/v1/tasks/{id}/complete
///
/// Mark a task completed. Employees may only complete their own tasks.
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    find_visible_task(&state, &user, id).await?;

    let task = TaskRepo::complete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "task", id }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id} (supervisor only)
pub async fn delete(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "task", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Load a task, enforcing that employees only see their own.
async fn find_visible_task(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Task> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "task", id }))?;

    if user.role == shelfsight_core::roles::ROLE_EMPLOYEE && task.employee_id != user.profile_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Task belongs to another employee".into(),
        )));
    }
    Ok(task)
}
