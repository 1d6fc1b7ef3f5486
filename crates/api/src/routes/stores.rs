//! Route definitions for store endpoints.
//!
//! Mounted at `/stores` within the `/api/v1` tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::stores;
use crate::state::AppState;

/// Build the `/stores` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(stores::list).post(stores::create))
        .route(
            "/{id}",
            get(stores::get).put(stores::update).delete(stores::delete),
        )
}
