//! Handlers for the `/reports` resource (supervisor only).
//!
//! Report generation computes the per-planogram compliance aggregate and
//! registers it as a report row with the aggregate as its JSON payload.
//! Binary document rendering (PDF, spreadsheets) is out of scope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shelfsight_core::error::CoreError;
use shelfsight_core::types::DbId;
use shelfsight_db::models::report::{CreateReport, Report, ReportTemplate};
use shelfsight_db::repositories::{ReportRepo, VerificationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireSupervisor;
use crate::state::AppState;

/// Request body for `POST /reports/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateReportRequest {
    pub template_id: DbId,
    /// Defaults to `one-time`.
    pub frequency: Option<String>,
}

/// GET /api/v1/reports/templates
pub async fn list_templates(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
) -> AppResult<Json<Vec<ReportTemplate>>> {
    let templates = ReportRepo::list_templates(&state.pool).await?;
    Ok(Json(templates))
}

/// POST /api/v1/reports/generate
///
/// Compute the template's aggregate and register the report.
pub async fn generate(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
    Json(input): Json<GenerateReportRequest>,
) -> AppResult<(StatusCode, Json<Report>)> {
    let template = ReportRepo::find_template(&state.pool, input.template_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "report template",
                id: input.template_id,
            })
        })?;

    let rows = VerificationRepo::compliance_by_planogram(&state.pool).await?;
    let payload = serde_json::to_value(&rows)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize report: {e}")))?;

    let report = ReportRepo::create(
        &state.pool,
        &CreateReport {
            template_id: template.id,
            name: template.name.clone(),
            report_type: template.report_type.clone(),
            frequency: input.frequency.unwrap_or_else(|| "one-time".to_string()),
            format: "json".to_string(),
            payload,
        },
    )
    .await?;

    tracing::info!(report_id = report.id, template_id = template.id, "Report generated");

    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/reports
pub async fn list(
    State(state): State<AppState>,
    RequireSupervisor(_user): RequireSupervisor,
) -> AppResult<Json<Vec<Report>>> {
    let reports = ReportRepo::list(&state.pool).await?;
    Ok(Json(reports))
}
