//! Shelf models and DTOs.

use serde::{Deserialize, Serialize};
use shelfsight_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `shelves` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Shelf {
    pub id: DbId,
    pub name: String,
    pub store_id: DbId,
    pub planogram_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A shelf joined with its store and planogram context, used by the
/// analysis pipeline and detail views.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShelfWithContext {
    pub id: DbId,
    pub name: String,
    pub store_id: DbId,
    pub planogram_id: DbId,
    pub store_name: String,
    pub planogram_name: String,
    pub department: String,
    pub slots_per_tray: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new shelf.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShelf {
    pub name: String,
    pub store_id: DbId,
    pub planogram_id: DbId,
}

/// DTO for updating a shelf. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShelf {
    pub name: Option<String>,
    pub store_id: Option<DbId>,
    pub planogram_id: Option<DbId>,
}
