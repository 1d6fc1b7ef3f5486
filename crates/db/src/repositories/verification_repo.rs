//! Repository for the `verifications` and `analysis_points` tables.

use shelfsight_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::verification::{
    AnalysisPoint, ComplianceSample, CreateAnalysisPoint, CreateVerification, Verification,
    VerificationWithShelf,
};

const COLUMNS: &str = "id, employee_id, shelf_id, image_url, compliance, status, created_at";

const POINT_COLUMNS: &str =
    "id, verification_id, x_percent, y_percent, severity, message, details, created_at";

/// Provides persistence for verification outcomes and their overlay points.
pub struct VerificationRepo;

impl VerificationRepo {
    /// Insert a verification row, returning it.
    ///
    /// Callers recording a full analysis run should go through
    /// [`crate::recorder::record`], which pairs this with the point insert
    /// and the compensating delete.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVerification,
    ) -> Result<Verification, sqlx::Error> {
        let query = format!(
            "INSERT INTO verifications (employee_id, shelf_id, image_url, compliance, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Verification>(&query)
            .bind(input.employee_id)
            .bind(input.shelf_id)
            .bind(&input.image_url)
            .bind(input.compliance)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Insert the overlay points for a verification, returning the rows in
    /// insertion order.
    pub async fn insert_points(
        pool: &PgPool,
        verification_id: DbId,
        points: &[CreateAnalysisPoint],
    ) -> Result<Vec<AnalysisPoint>, sqlx::Error> {
        let query = format!(
            "INSERT INTO analysis_points
                (verification_id, x_percent, y_percent, severity, message, details)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {POINT_COLUMNS}"
        );

        let mut inserted = Vec::with_capacity(points.len());
        for point in points {
            let row = sqlx::query_as::<_, AnalysisPoint>(&query)
                .bind(verification_id)
                .bind(point.x_percent)
                .bind(point.y_percent)
                .bind(&point.severity)
                .bind(&point.message)
                .bind(&point.details)
                .fetch_one(pool)
                .await?;
            inserted.push(row);
        }
        Ok(inserted)
    }

    /// Delete a verification (its points cascade). Returns `true` if a row
    /// was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM verifications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a verification by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Verification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM verifications WHERE id = $1");
        sqlx::query_as::<_, Verification>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All overlay points of a verification.
    pub async fn points_for(
        pool: &PgPool,
        verification_id: DbId,
    ) -> Result<Vec<AnalysisPoint>, sqlx::Error> {
        let query = format!(
            "SELECT {POINT_COLUMNS} FROM analysis_points
             WHERE verification_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, AnalysisPoint>(&query)
            .bind(verification_id)
            .fetch_all(pool)
            .await
    }

    /// Page through an employee's verification history with shelf context,
    /// most recent first.
    pub async fn list_for_employee(
        pool: &PgPool,
        employee_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<VerificationWithShelf>, sqlx::Error> {
        sqlx::query_as::<_, VerificationWithShelf>(
            "SELECT v.id, v.employee_id, v.shelf_id, v.image_url, v.compliance, v.status,
                    v.created_at, sh.name AS shelf_name, sh.store_id, sh.planogram_id
             FROM verifications v
             JOIN shelves sh ON sh.id = v.shelf_id
             WHERE v.employee_id = $1
             ORDER BY v.created_at DESC
             LIMIT $2 OFFSET $3",
        )
        .bind(employee_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Compliance scores of an employee's most recent verifications.
    pub async fn recent_scores_for_employee(
        pool: &PgPool,
        employee_id: DbId,
        limit: i64,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT compliance FROM verifications
             WHERE employee_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2",
        )
        .bind(employee_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Compliance scores of an employee's verifications inside a half-open
    /// time window.
    pub async fn scores_in_window(
        pool: &PgPool,
        employee_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT compliance FROM verifications
             WHERE employee_id = $1 AND created_at >= $2 AND created_at < $3",
        )
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Compliance scores of the most recent verifications across one store's
    /// shelves.
    pub async fn recent_scores_for_store(
        pool: &PgPool,
        store_id: DbId,
        limit: i64,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT v.compliance
             FROM verifications v
             JOIN shelves sh ON sh.id = v.shelf_id
             WHERE sh.store_id = $1
             ORDER BY v.created_at DESC, v.id DESC
             LIMIT $2",
        )
        .bind(store_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Compliance scores of the most recent verifications for shelves whose
    /// planogram belongs to a department.
    pub async fn recent_scores_for_department(
        pool: &PgPool,
        department: &str,
        limit: i64,
    ) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT v.compliance
             FROM verifications v
             JOIN shelves sh ON sh.id = v.shelf_id
             JOIN planograms p ON p.id = sh.planogram_id
             WHERE p.department = $1
             ORDER BY v.created_at DESC, v.id DESC
             LIMIT $2",
        )
        .bind(department)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// `(created_at, compliance)` samples for an employee in a date range,
    /// oldest first; the caller groups them per day.
    pub async fn samples_in_range(
        pool: &PgPool,
        employee_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<ComplianceSample>, sqlx::Error> {
        sqlx::query_as::<_, ComplianceSample>(
            "SELECT created_at, compliance FROM verifications
             WHERE employee_id = $1 AND created_at >= $2 AND created_at < $3
             ORDER BY created_at ASC",
        )
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }

    /// Average compliance per planogram across all verifications, with the
    /// number of shelves sampled. Feeds the compliance summary report.
    pub async fn compliance_by_planogram(
        pool: &PgPool,
    ) -> Result<Vec<PlanogramCompliance>, sqlx::Error> {
        sqlx::query_as::<_, PlanogramCompliance>(
            "SELECT p.id AS planogram_id, p.name, p.category, p.department,
                    COUNT(DISTINCT sh.id) AS shelf_count,
                    COALESCE(ROUND(AVG(v.compliance))::int, 0) AS avg_compliance
             FROM planograms p
             LEFT JOIN shelves sh ON sh.planogram_id = p.id
             LEFT JOIN verifications v ON v.shelf_id = sh.id
             GROUP BY p.id
             ORDER BY p.name ASC",
        )
        .fetch_all(pool)
        .await
    }
}

/// One row of the per-planogram compliance aggregate.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct PlanogramCompliance {
    pub planogram_id: DbId,
    pub name: String,
    pub category: String,
    pub department: String,
    pub shelf_count: i64,
    pub avg_compliance: i32,
}
