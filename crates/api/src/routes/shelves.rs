//! Route definitions for shelf endpoints.
//!
//! Mounted at `/shelves` within the `/api/v1` tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::shelves;
use crate::state::AppState;

/// Build the `/shelves` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shelves::list).post(shelves::create))
        .route(
            "/{id}",
            get(shelves::get)
                .put(shelves::update)
                .delete(shelves::delete),
        )
}
