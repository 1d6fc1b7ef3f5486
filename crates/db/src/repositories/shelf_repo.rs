//! Repository for the `shelves` table.

use shelfsight_core::types::DbId;
use sqlx::PgPool;

use crate::models::shelf::{CreateShelf, Shelf, ShelfWithContext, UpdateShelf};

const COLUMNS: &str = "id, name, store_id, planogram_id, created_at, updated_at";

/// Join selecting a shelf together with its store and planogram context.
const CONTEXT_SELECT: &str = "SELECT sh.id, sh.name, sh.store_id, sh.planogram_id,
        st.name AS store_name, p.name AS planogram_name, p.department, p.slots_per_tray,
        sh.created_at, sh.updated_at
     FROM shelves sh
     JOIN stores st ON st.id = sh.store_id
     JOIN planograms p ON p.id = sh.planogram_id";

/// Provides CRUD operations for shelves.
pub struct ShelfRepo;

impl ShelfRepo {
    /// Insert a new shelf, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateShelf) -> Result<Shelf, sqlx::Error> {
        let query = format!(
            "INSERT INTO shelves (name, store_id, planogram_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shelf>(&query)
            .bind(&input.name)
            .bind(input.store_id)
            .bind(input.planogram_id)
            .fetch_one(pool)
            .await
    }

    /// Find a shelf by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Shelf>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shelves WHERE id = $1");
        sqlx::query_as::<_, Shelf>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a shelf with its store and planogram context.
    pub async fn find_with_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ShelfWithContext>, sqlx::Error> {
        let query = format!("{CONTEXT_SELECT} WHERE sh.id = $1");
        sqlx::query_as::<_, ShelfWithContext>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all shelves with context, ordered by store then shelf name.
    pub async fn list_with_context(pool: &PgPool) -> Result<Vec<ShelfWithContext>, sqlx::Error> {
        let query = format!("{CONTEXT_SELECT} ORDER BY st.name ASC, sh.name ASC");
        sqlx::query_as::<_, ShelfWithContext>(&query)
            .fetch_all(pool)
            .await
    }

    /// List shelves belonging to one store.
    pub async fn list_by_store(pool: &PgPool, store_id: DbId) -> Result<Vec<Shelf>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shelves WHERE store_id = $1 ORDER BY name ASC"
        );
        sqlx::query_as::<_, Shelf>(&query)
            .bind(store_id)
            .fetch_all(pool)
            .await
    }

    /// Update a shelf. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShelf,
    ) -> Result<Option<Shelf>, sqlx::Error> {
        let query = format!(
            "UPDATE shelves SET
                name = COALESCE($2, name),
                store_id = COALESCE($3, store_id),
                planogram_id = COALESCE($4, planogram_id),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shelf>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.store_id)
            .bind(input.planogram_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a shelf. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shelves WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
