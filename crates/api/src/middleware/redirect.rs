//! Role-based redirect rule for the page-style routes.
//!
//! Browser-facing paths follow the navigation contract: an unauthenticated
//! request to anything but the root is sent back to `/`; an employee landing
//! on a supervisor page is sent to the employee dashboard, and vice versa.
//! The JSON API under `/api/v1` uses 401/403 responses instead -- this
//! middleware is mounted only on the page routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use shelfsight_core::roles::{ROLE_EMPLOYEE, ROLE_SUPERVISOR};

use crate::auth::jwt::validate_token;
use crate::state::AppState;

/// Where the navigation contract sends a request, if anywhere.
///
/// `role` is `None` for unauthenticated requests.
pub fn redirect_target(role: Option<&str>, path: &str) -> Option<&'static str> {
    match role {
        None => {
            if path != "/" {
                Some("/")
            } else {
                None
            }
        }
        Some(ROLE_EMPLOYEE) if path.starts_with("/supervisor") => Some("/employee/dashboard"),
        Some(ROLE_SUPERVISOR) if path.starts_with("/employee") => Some("/supervisor/dashboard"),
        Some(_) => None,
    }
}

/// Axum middleware applying [`redirect_target`] to incoming page requests.
pub async fn role_redirect(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let role = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| validate_token(token, &state.config.jwt).ok())
        .map(|claims| claims.role);

    if let Some(target) = redirect_target(role.as_deref(), request.uri().path()) {
        return Redirect::temporary(target).into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_non_root_goes_home() {
        assert_eq!(redirect_target(None, "/employee/dashboard"), Some("/"));
        assert_eq!(redirect_target(None, "/supervisor/reports"), Some("/"));
    }

    #[test]
    fn unauthenticated_root_passes() {
        assert_eq!(redirect_target(None, "/"), None);
    }

    #[test]
    fn employee_on_supervisor_path_redirects() {
        assert_eq!(
            redirect_target(Some("employee"), "/supervisor/dashboard"),
            Some("/employee/dashboard")
        );
    }

    #[test]
    fn supervisor_on_employee_path_redirects() {
        assert_eq!(
            redirect_target(Some("supervisor"), "/employee/history"),
            Some("/supervisor/dashboard")
        );
    }

    #[test]
    fn matching_role_passes() {
        assert_eq!(redirect_target(Some("employee"), "/employee/dashboard"), None);
        assert_eq!(
            redirect_target(Some("supervisor"), "/supervisor/dashboard"),
            None
        );
    }
}
