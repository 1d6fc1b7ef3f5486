//! Handlers for the `/planograms` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelfsight_core::error::CoreError;
use shelfsight_core::types::DbId;
use shelfsight_db::models::planogram::{CreatePlanogram, Planogram, UpdatePlanogram};
use shelfsight_db::repositories::PlanogramRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireSupervisor};
use crate::state::AppState;

/// GET /api/v1/planograms
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<Planogram>>> {
    let planograms = PlanogramRepo::list(&state.pool).await?;
    Ok(Json(planograms))
}

/// GET /api/v1/planograms/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Planogram>> {
    let planogram = PlanogramRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "planogram",
                id,
            })
        })?;
    Ok(Json(planogram))
}

/// POST /api/v1/planograms (supervisor only)
pub async fn create(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Json(input): Json<CreatePlanogram>,
) -> AppResult<(StatusCode, Json<Planogram>)> {
    if let Some(slots) = input.slots_per_tray {
        if slots < 1 {
            return Err(AppError::Core(CoreError::Validation(
                "slots_per_tray must be at least 1".into(),
            )));
        }
    }
    let planogram = PlanogramRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(planogram)))
}

/// PUT /api/v1/planograms/{id} (supervisor only)
pub async fn update(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlanogram>,
) -> AppResult<Json<Planogram>> {
    let planogram = PlanogramRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "planogram",
                id,
            })
        })?;
    Ok(Json(planogram))
}

/// DELETE /api/v1/planograms/{id} (supervisor only)
pub async fn delete(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = PlanogramRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "planogram",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
