//! Page-style dashboard aggregates for the two roles.
//!
//! These sit on the browser-facing paths (`/employee/dashboard`,
//! `/supervisor/dashboard`) guarded by the role-redirect middleware.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use shelfsight_core::trend::{
    average_compliance, compliance_trend, previous_week_bounds, week_bounds, ComplianceTrend,
};
use shelfsight_db::models::task::TaskWithShelf;
use shelfsight_db::repositories::verification_repo::PlanogramCompliance;
use shelfsight_db::repositories::{StoreRepo, TaskRepo, VerificationRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Window feeding the employee's headline compliance number.
const RECENT_WINDOW: i64 = 5;
/// Window feeding each store's compliance number.
const STORE_WINDOW: i64 = 20;

/// Response body for `GET /employee/dashboard`.
#[derive(Debug, Serialize)]
pub struct EmployeeDashboard {
    pub current_compliance: i32,
    pub trend: ComplianceTrend,
    pub pending_tasks: Vec<TaskWithShelf>,
}

/// One store row on the supervisor dashboard.
#[derive(Debug, Serialize)]
pub struct StoreCompliance {
    pub store_id: i64,
    pub store_name: String,
    pub compliance: i32,
}

/// Response body for `GET /supervisor/dashboard`.
#[derive(Debug, Serialize)]
pub struct SupervisorDashboard {
    pub stores: Vec<StoreCompliance>,
    pub planograms: Vec<PlanogramCompliance>,
}

/// GET /employee/dashboard
pub async fn employee(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<EmployeeDashboard>> {
    let recent =
        VerificationRepo::recent_scores_for_employee(&state.pool, user.profile_id, RECENT_WINDOW)
            .await?;

    let now = Utc::now();
    let (cur_start, cur_end) = week_bounds(now);
    let (prev_start, prev_end) = previous_week_bounds(now);
    let current_scores =
        VerificationRepo::scores_in_window(&state.pool, user.profile_id, cur_start, cur_end)
            .await?;
    let previous_scores =
        VerificationRepo::scores_in_window(&state.pool, user.profile_id, prev_start, prev_end)
            .await?;

    let pending = TaskRepo::list_pending_for_employee(&state.pool, user.profile_id).await?;

    Ok(Json(EmployeeDashboard {
        current_compliance: average_compliance(&recent),
        trend: compliance_trend(
            average_compliance(&current_scores),
            average_compliance(&previous_scores),
        ),
        pending_tasks: pending,
    }))
}

/// GET /supervisor/dashboard
pub async fn supervisor(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<SupervisorDashboard>> {
    let stores = StoreRepo::list_with_manager(&state.pool).await?;

    let mut store_rows = Vec::with_capacity(stores.len());
    for store in &stores {
        let scores =
            VerificationRepo::recent_scores_for_store(&state.pool, store.id, STORE_WINDOW).await?;
        store_rows.push(StoreCompliance {
            store_id: store.id,
            store_name: store.name.clone(),
            compliance: average_compliance(&scores),
        });
    }

    let planograms = VerificationRepo::compliance_by_planogram(&state.pool).await?;

    Ok(Json(SupervisorDashboard {
        stores: store_rows,
        planograms,
    }))
}
