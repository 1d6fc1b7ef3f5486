//! Route definitions for report endpoints (supervisor only).
//!
//! Mounted at `/reports` within the `/api/v1` tree.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Build the `/reports` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list))
        .route("/templates", get(reports::list_templates))
        .route("/generate", post(reports::generate))
}
