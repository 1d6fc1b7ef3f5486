//! Report template and generated-report models.

use serde::{Deserialize, Serialize};
use shelfsight_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `report_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReportTemplate {
    pub id: DbId,
    pub name: String,
    pub report_type: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub template_id: DbId,
    pub name: String,
    pub report_type: String,
    pub frequency: String,
    pub format: String,
    pub status: String,
    pub payload: serde_json::Value,
    pub generated_at: Timestamp,
}

/// DTO for registering a generated report.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReport {
    pub template_id: DbId,
    pub name: String,
    pub report_type: String,
    pub frequency: String,
    pub format: String,
    pub payload: serde_json::Value,
}
