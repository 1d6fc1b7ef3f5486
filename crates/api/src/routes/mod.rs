//! Route tree construction.

pub mod auth;
pub mod compliance;
pub mod dashboard;
pub mod health;
pub mod planograms;
pub mod reports;
pub mod shelves;
pub mod stores;
pub mod tasks;
pub mod verifications;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
/// /auth/me                             current profile (requires auth)
///
/// /stores                              list, create
/// /stores/{id}                         get, update, delete
///
/// /planograms                          list, create
/// /planograms/{id}                     get, update, delete
///
/// /shelves                             list, create
/// /shelves/{id}                        get, update, delete
///
/// /tasks                               list, create
/// /tasks/pending                       pending tasks (GET)
/// /tasks/{id}                          get, update, delete
/// /tasks/{id}/complete                 complete (POST)
///
/// /verifications/analyze               run analysis pipeline (POST, employee)
/// /verifications                       own history (GET, paged)
/// /verifications/{id}                  verification with points (GET)
///
/// /compliance/current                  recent average (GET)
/// /compliance/weekly                   weekly average (GET, ?date=)
/// /compliance/trend                    week-over-week trend (GET)
/// /compliance/history                  per-day history (GET, ?start=&end=)
/// /compliance/stores/{id}              store average (GET)
/// /compliance/departments/{department} department average (GET)
///
/// /reports/templates                   list templates (supervisor)
/// /reports/generate                    generate report (POST, supervisor)
/// /reports                             list generated reports (supervisor)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/stores", stores::router())
        .nest("/planograms", planograms::router())
        .nest("/shelves", shelves::router())
        .nest("/tasks", tasks::router())
        .nest("/verifications", verifications::router())
        .nest("/compliance", compliance::router())
        .nest("/reports", reports::router())
}

/// Build the browser-facing page routes (`/employee/*`, `/supervisor/*`),
/// wrapped in the role-redirect middleware.
pub fn page_routes(state: AppState) -> Router<AppState> {
    dashboard::router(state)
}
