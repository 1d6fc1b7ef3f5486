//! Handlers for the `/shelves` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelfsight_core::error::CoreError;
use shelfsight_core::types::DbId;
use shelfsight_db::models::shelf::{CreateShelf, Shelf, ShelfWithContext, UpdateShelf};
use shelfsight_db::repositories::ShelfRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireSupervisor};
use crate::state::AppState;

/// GET /api/v1/shelves
///
/// List all shelves with store and planogram context.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<ShelfWithContext>>> {
    let shelves = ShelfRepo::list_with_context(&state.pool).await?;
    Ok(Json(shelves))
}

/// GET /api/v1/shelves/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ShelfWithContext>> {
    let shelf = ShelfRepo::find_with_context(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "shelf", id }))?;
    Ok(Json(shelf))
}

/// POST /api/v1/shelves (supervisor only)
pub async fn create(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Json(input): Json<CreateShelf>,
) -> AppResult<(StatusCode, Json<Shelf>)> {
    let shelf = ShelfRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(shelf)))
}

/// PUT /api/v1/shelves/{id} (supervisor only)
pub async fn update(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateShelf>,
) -> AppResult<Json<Shelf>> {
    let shelf = ShelfRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "shelf", id }))?;
    Ok(Json(shelf))
}

/// DELETE /api/v1/shelves/{id} (supervisor only)
pub async fn delete(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ShelfRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "shelf", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
