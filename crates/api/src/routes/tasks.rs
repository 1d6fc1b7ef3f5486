//! Route definitions for task endpoints.
//!
//! Mounted at `/tasks` within the `/api/v1` tree.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Build the `/tasks` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route("/pending", get(tasks::list_pending))
        .route(
            "/{id}",
            get(tasks::get).put(tasks::update).delete(tasks::delete),
        )
        .route("/{id}/complete", post(tasks::complete))
}
