//! Planogram models and DTOs.

use serde::{Deserialize, Serialize};
use shelfsight_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `planograms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Planogram {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub department: String,
    pub status: String,
    /// Slot count per tray, consumed by the spatial mapper.
    pub slots_per_tray: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new planogram.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanogram {
    pub name: String,
    pub category: String,
    pub department: String,
    pub status: Option<String>,
    pub slots_per_tray: Option<i32>,
}

/// DTO for updating a planogram. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlanogram {
    pub name: Option<String>,
    pub category: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
    pub slots_per_tray: Option<i32>,
}
