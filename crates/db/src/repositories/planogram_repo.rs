//! Repository for the `planograms` table.

use shelfsight_core::types::DbId;
use sqlx::PgPool;

use crate::models::planogram::{CreatePlanogram, Planogram, UpdatePlanogram};

const COLUMNS: &str =
    "id, name, category, department, status, slots_per_tray, created_at, updated_at";

/// Provides CRUD operations for planograms.
pub struct PlanogramRepo;

impl PlanogramRepo {
    /// Insert a new planogram, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePlanogram) -> Result<Planogram, sqlx::Error> {
        let query = format!(
            "INSERT INTO planograms (name, category, department, status, slots_per_tray)
             VALUES ($1, $2, $3, COALESCE($4, 'active'), COALESCE($5, 23))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Planogram>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.department)
            .bind(&input.status)
            .bind(input.slots_per_tray)
            .fetch_one(pool)
            .await
    }

    /// Find a planogram by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Planogram>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planograms WHERE id = $1");
        sqlx::query_as::<_, Planogram>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all planograms, ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Planogram>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planograms ORDER BY name ASC");
        sqlx::query_as::<_, Planogram>(&query).fetch_all(pool).await
    }

    /// Update a planogram. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlanogram,
    ) -> Result<Option<Planogram>, sqlx::Error> {
        let query = format!(
            "UPDATE planograms SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                department = COALESCE($4, department),
                status = COALESCE($5, status),
                slots_per_tray = COALESCE($6, slots_per_tray),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Planogram>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.department)
            .bind(&input.status)
            .bind(input.slots_per_tray)
            .fetch_optional(pool)
            .await
    }

    /// Delete a planogram. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM planograms WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
