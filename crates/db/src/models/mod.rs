//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod planogram;
pub mod profile;
pub mod report;
pub mod session;
pub mod shelf;
pub mod store;
pub mod task;
pub mod verification;
