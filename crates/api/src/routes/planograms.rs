//! Route definitions for planogram endpoints.
//!
//! Mounted at `/planograms` within the `/api/v1` tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::planograms;
use crate::state::AppState;

/// Build the `/planograms` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(planograms::list).post(planograms::create))
        .route(
            "/{id}",
            get(planograms::get)
                .put(planograms::update)
                .delete(planograms::delete),
        )
}
