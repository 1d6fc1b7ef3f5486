//! Route definitions for verification endpoints.
//!
//! Mounted at `/verifications` within the `/api/v1` tree.
//!
//! ```text
//! POST /analyze -> analyze (multipart: shelf_id, image)
//! GET  /        -> list (own history, ?limit=&offset=)
//! GET  /{id}    -> get (verification with points)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::verifications;
use crate::state::AppState;

/// Build the `/verifications` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(verifications::analyze))
        .route("/", get(verifications::list))
        .route("/{id}", get(verifications::get))
}
