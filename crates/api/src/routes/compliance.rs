//! Route definitions for compliance aggregation endpoints.
//!
//! Mounted at `/compliance` within the `/api/v1` tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::compliance;
use crate::state::AppState;

/// Build the `/compliance` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/current", get(compliance::current))
        .route("/weekly", get(compliance::weekly))
        .route("/trend", get(compliance::trend))
        .route("/history", get(compliance::history))
        .route("/stores/{id}", get(compliance::store))
        .route("/departments/{department}", get(compliance::department))
}
