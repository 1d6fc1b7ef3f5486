//! Store models and DTOs.

use serde::{Deserialize, Serialize};
use shelfsight_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `stores` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Store {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub manager_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A store joined with its manager's name, for listing views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoreWithManager {
    pub id: DbId,
    pub name: String,
    pub address: String,
    pub manager_id: Option<DbId>,
    pub manager_first_name: Option<String>,
    pub manager_last_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new store.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStore {
    pub name: String,
    pub address: String,
    pub manager_id: Option<DbId>,
}

/// DTO for updating a store. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStore {
    pub name: Option<String>,
    pub address: Option<String>,
    pub manager_id: Option<DbId>,
}
