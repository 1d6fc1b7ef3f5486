//! Handlers for the `/verifications` resource.
//!
//! `analyze` runs the full pipeline for one shelf photo: upload → vision
//! service → spatial mapping → classification → scoring → recording. The
//! other handlers expose the recorded history.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shelfsight_core::classify::{classify_anomalies, DisplayPoint};
use shelfsight_core::error::CoreError;
use shelfsight_core::layout::{ShelfLayout, TrayGroup};
use shelfsight_core::score::{score_points, ScoreBreakdown};
use shelfsight_core::types::DbId;
use shelfsight_db::models::verification::{
    AnalysisPoint, CreateAnalysisPoint, CreateVerification, Verification, VerificationWithShelf,
};
use shelfsight_db::recorder;
use shelfsight_db::repositories::{ShelfRepo, VerificationRepo};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEmployee;
use crate::state::AppState;

/// Default page size for verification history.
const DEFAULT_HISTORY_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /verifications`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response body returned by `POST /verifications/analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub verification: Verification,
    pub points: Vec<AnalysisPoint>,
    pub score: ScoreBreakdown,
}

/// Response body returned by `GET /verifications/{id}`.
#[derive(Debug, Serialize)]
pub struct VerificationDetail {
    pub verification: Verification,
    pub points: Vec<AnalysisPoint>,
}

/// Image payload pulled out of the multipart form.
struct UploadedImage {
    filename: String,
    bytes: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/verifications/analyze (employee only)
///
/// Multipart form carrying `shelf_id` and `image`. Sends the photo to the
/// vision service, maps and classifies the returned anomalies, scores
/// compliance, stores the image locally, and records the outcome.
pub async fn analyze(
    State(state): State<AppState>,
    RequireEmployee(user): RequireEmployee,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<AnalyzeResponse>)> {
    // 1. Pull the shelf id and image out of the form.
    let (shelf_id, image) = read_analyze_form(multipart).await?;

    // 2. Reject payloads that are not actually images before any network I/O.
    image::guess_format(&image.bytes).map_err(|_| {
        AppError::Core(CoreError::Validation(
            "Uploaded file is not a recognized image format".into(),
        ))
    })?;

    // 3. The shelf decides the store and the planogram geometry.
    let shelf = ShelfRepo::find_with_context(&state.pool, shelf_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "shelf",
                id: shelf_id,
            })
        })?;

    // 4. Persist the photo so the overlay can render it later.
    let image_url = store_image(&state, user.profile_id, &image).await?;

    // 5. Ask the vision service for anomalies.
    let analysis = state
        .vision
        .analyze_shelf(
            &shelf.store_id.to_string(),
            &shelf.id.to_string(),
            &image.filename,
            image.bytes,
        )
        .await?;
    let anomalies = analysis.into_anomalies()?;

    tracing::info!(
        shelf_id = shelf.id,
        anomaly_count = anomalies.len(),
        "Vision analysis complete",
    );

    // 6. Map, classify, and score.
    let slots_per_tray = u32::try_from(shelf.slots_per_tray).map_err(|_| {
        AppError::Core(CoreError::Validation(
            "Planogram slot count is not a positive integer".into(),
        ))
    })?;
    let layout = ShelfLayout::new(slots_per_tray)?;
    let group = TrayGroup::new(1)?;
    let points = classify_anomalies(&anomalies, &layout, &group)?;
    let score = score_points(&points, &state.config.scoring);

    // 7. Record the outcome as one logical unit.
    let draft = CreateVerification {
        employee_id: user.profile_id,
        shelf_id: shelf.id,
        image_url,
        compliance: i32::from(score.compliance),
        status: score.status.as_str().to_string(),
    };
    let point_rows: Vec<CreateAnalysisPoint> = points.iter().map(to_point_row).collect();
    let record = recorder::record(&state.pool, &draft, &point_rows).await?;

    Ok((
        StatusCode::CREATED,
        Json(AnalyzeResponse {
            verification: record.verification,
            points: record.points,
            score,
        }),
    ))
}

/// GET /api/v1/verifications
///
/// Page through the authenticated employee's verification history.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<VerificationWithShelf>>> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, 200);
    let offset = query.offset.unwrap_or(0).max(0);

    let history =
        VerificationRepo::list_for_employee(&state.pool, user.profile_id, limit, offset).await?;
    Ok(Json(history))
}

/// GET /api/v1/verifications/{id}
///
/// A verification with its overlay points. Employees see only their own
/// runs; supervisors see everything.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<VerificationDetail>> {
    let verification = VerificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "verification",
                id,
            })
        })?;

    if user.role == shelfsight_core::roles::ROLE_EMPLOYEE
        && verification.employee_id != user.profile_id
    {
        return Err(AppError::Core(CoreError::Forbidden(
            "Verification belongs to another employee".into(),
        )));
    }

    let points = VerificationRepo::points_for(&state.pool, id).await?;
    Ok(Json(VerificationDetail {
        verification,
        points,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Extract `shelf_id` and `image` from the analyze form.
async fn read_analyze_form(mut multipart: Multipart) -> AppResult<(DbId, UploadedImage)> {
    let mut shelf_id: Option<DbId> = None;
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("shelf_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid shelf_id field: {e}")))?;
                let id = text.parse().map_err(|_| {
                    AppError::Core(CoreError::Validation(format!(
                        "shelf_id must be an integer, got {text:?}"
                    )))
                })?;
                shelf_id = Some(id);
            }
            Some("image") => {
                let filename = field
                    .file_name()
                    .unwrap_or("shelf.jpg")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid image field: {e}")))?;
                image = Some(UploadedImage {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let shelf_id = shelf_id
        .ok_or_else(|| AppError::Core(CoreError::Validation("Missing shelf_id field".into())))?;
    let image = image
        .ok_or_else(|| AppError::Core(CoreError::Validation("Missing image field".into())))?;

    if image.bytes.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Uploaded image is empty".into(),
        )));
    }

    Ok((shelf_id, image))
}

/// Write the uploaded photo under the configured image directory and return
/// the URL it will be served from.
async fn store_image(
    state: &AppState,
    employee_id: DbId,
    image: &UploadedImage,
) -> AppResult<String> {
    let extension = image
        .filename
        .rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && ext.len() <= 5)
        .unwrap_or("jpg");
    let file_name = format!("{employee_id}_{}.{extension}", Uuid::new_v4());

    let dir = std::path::Path::new(&state.config.image_dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create image dir: {e}")))?;
    tokio::fs::write(dir.join(&file_name), &image.bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;

    Ok(format!("/images/{file_name}"))
}

/// Convert a classified display point into its insert DTO.
fn to_point_row(point: &DisplayPoint) -> CreateAnalysisPoint {
    CreateAnalysisPoint {
        x_percent: point.x_percent,
        y_percent: point.y_percent,
        severity: point.severity.as_str().to_string(),
        message: point.message.clone(),
        details: point.details.clone(),
    }
}
