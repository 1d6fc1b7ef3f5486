//! Handlers for the `/stores` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelfsight_core::error::CoreError;
use shelfsight_core::types::DbId;
use shelfsight_db::models::store::{CreateStore, Store, StoreWithManager, UpdateStore};
use shelfsight_db::repositories::StoreRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireSupervisor};
use crate::state::AppState;

/// GET /api/v1/stores
///
/// List all stores with their manager's name.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<StoreWithManager>>> {
    let stores = StoreRepo::list_with_manager(&state.pool).await?;
    Ok(Json(stores))
}

/// GET /api/v1/stores/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Store>> {
    let store = StoreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "store", id }))?;
    Ok(Json(store))
}

/// POST /api/v1/stores (supervisor only)
pub async fn create(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Json(input): Json<CreateStore>,
) -> AppResult<(StatusCode, Json<Store>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Store name must not be empty".into(),
        )));
    }
    let store = StoreRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

/// PUT /api/v1/stores/{id} (supervisor only)
pub async fn update(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStore>,
) -> AppResult<Json<Store>> {
    let store = StoreRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "store", id }))?;
    Ok(Json(store))
}

/// DELETE /api/v1/stores/{id} (supervisor only)
pub async fn delete(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = StoreRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "store", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
