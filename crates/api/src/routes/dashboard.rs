//! Browser-facing dashboard routes, guarded by the role-redirect rule.
//!
//! ```text
//! GET /employee/dashboard   -> employee dashboard aggregate
//! GET /supervisor/dashboard -> supervisor dashboard aggregate
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::middleware::redirect::role_redirect;
use crate::state::AppState;

/// Build the page router with the redirect middleware applied.
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/employee/dashboard", get(dashboard::employee))
        .route("/supervisor/dashboard", get(dashboard::supervisor))
        .layer(axum::middleware::from_fn_with_state(state, role_redirect))
}
