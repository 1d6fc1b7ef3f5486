//! Verification and analysis-point models.

use serde::{Deserialize, Serialize};
use shelfsight_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `verifications` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Verification {
    pub id: DbId,
    pub employee_id: DbId,
    pub shelf_id: DbId,
    pub image_url: String,
    pub compliance: i32,
    pub status: String,
    pub created_at: Timestamp,
}

/// A verification joined with its shelf context, for history views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VerificationWithShelf {
    pub id: DbId,
    pub employee_id: DbId,
    pub shelf_id: DbId,
    pub image_url: String,
    pub compliance: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub shelf_name: String,
    pub store_id: DbId,
    pub planogram_id: DbId,
}

/// A row from the `analysis_points` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnalysisPoint {
    pub id: DbId,
    pub verification_id: DbId,
    pub x_percent: f64,
    pub y_percent: f64,
    pub severity: String,
    pub message: String,
    pub details: String,
    pub created_at: Timestamp,
}

/// DTO for creating a verification row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVerification {
    pub employee_id: DbId,
    pub shelf_id: DbId,
    pub image_url: String,
    pub compliance: i32,
    pub status: String,
}

/// DTO for creating an analysis point under a verification.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnalysisPoint {
    pub x_percent: f64,
    pub y_percent: f64,
    pub severity: String,
    pub message: String,
    pub details: String,
}

/// A `(created_at, compliance)` sample used by history aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct ComplianceSample {
    pub created_at: Timestamp,
    pub compliance: i32,
}
