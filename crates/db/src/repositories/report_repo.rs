//! Repository for the `report_templates` and `reports` tables.

use shelfsight_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report, ReportTemplate};

const TEMPLATE_COLUMNS: &str = "id, name, report_type, description, created_at";

const REPORT_COLUMNS: &str =
    "id, template_id, name, report_type, frequency, format, status, payload, generated_at";

/// Provides persistence for report templates and generated reports.
pub struct ReportRepo;

impl ReportRepo {
    /// List all report templates, ordered by name.
    pub async fn list_templates(pool: &PgPool) -> Result<Vec<ReportTemplate>, sqlx::Error> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM report_templates ORDER BY name ASC");
        sqlx::query_as::<_, ReportTemplate>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find a report template by ID.
    pub async fn find_template(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReportTemplate>, sqlx::Error> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM report_templates WHERE id = $1");
        sqlx::query_as::<_, ReportTemplate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Register a generated report, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (template_id, name, report_type, frequency, format, payload)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {REPORT_COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.template_id)
            .bind(&input.name)
            .bind(&input.report_type)
            .bind(&input.frequency)
            .bind(&input.format)
            .bind(&input.payload)
            .fetch_one(pool)
            .await
    }

    /// List generated reports, most recent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!("SELECT {REPORT_COLUMNS} FROM reports ORDER BY generated_at DESC");
        sqlx::query_as::<_, Report>(&query).fetch_all(pool).await
    }
}
