//! Integration tests for the role-redirect rule on the page routes.

mod common;

use axum::http::StatusCode;
use common::{get, get_auth, register_and_login};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn unauthenticated_dashboard_redirects_home(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/employee/dashboard").await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn employee_on_supervisor_page_is_redirected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, employee) = register_and_login(&app, "emp@example.com", "employee").await;

    let response = get_auth(app, "/supervisor/dashboard", &employee).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/employee/dashboard");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn supervisor_on_employee_page_is_redirected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, supervisor) = register_and_login(&app, "sup@example.com", "supervisor").await;

    let response = get_auth(app, "/employee/dashboard", &supervisor).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()["location"], "/supervisor/dashboard");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn matching_role_reaches_its_dashboard(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, employee) = register_and_login(&app, "emp2@example.com", "employee").await;

    let response = get_auth(app, "/employee/dashboard", &employee).await;
    assert_eq!(response.status(), StatusCode::OK);

    let dashboard = common::body_json(response).await;
    assert_eq!(dashboard["current_compliance"], 0);
    assert_eq!(dashboard["trend"]["trend"], "0%");
    assert!(dashboard["pending_tasks"].as_array().unwrap().is_empty());
}
