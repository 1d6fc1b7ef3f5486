//! Repository for the `stores` table.

use shelfsight_core::types::DbId;
use sqlx::PgPool;

use crate::models::store::{CreateStore, Store, StoreWithManager, UpdateStore};

const COLUMNS: &str = "id, name, address, manager_id, created_at, updated_at";

/// Provides CRUD operations for stores.
pub struct StoreRepo;

impl StoreRepo {
    /// Insert a new store, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStore) -> Result<Store, sqlx::Error> {
        let query = format!(
            "INSERT INTO stores (name, address, manager_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(&input.name)
            .bind(&input.address)
            .bind(input.manager_id)
            .fetch_one(pool)
            .await
    }

    /// Find a store by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Store>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stores WHERE id = $1");
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all stores with their manager's name, ordered by name.
    pub async fn list_with_manager(pool: &PgPool) -> Result<Vec<StoreWithManager>, sqlx::Error> {
        sqlx::query_as::<_, StoreWithManager>(
            "SELECT s.id, s.name, s.address, s.manager_id,
                    p.first_name AS manager_first_name, p.last_name AS manager_last_name,
                    s.created_at, s.updated_at
             FROM stores s
             LEFT JOIN profiles p ON p.id = s.manager_id
             ORDER BY s.name ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a store. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStore,
    ) -> Result<Option<Store>, sqlx::Error> {
        let query = format!(
            "UPDATE stores SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                manager_id = COALESCE($4, manager_id),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Store>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(input.manager_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a store. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stores WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
