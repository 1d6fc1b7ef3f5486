//! Integration tests for registration, login, and the session lifecycle.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get_auth, register_and_login, send_json};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_login_me_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool);

    let (profile_id, token) = register_and_login(&app, "ana@example.com", "employee").await;

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let me = body_json(response).await;
    assert_eq!(me["id"].as_i64().unwrap(), profile_id);
    assert_eq!(me["email"], "ana@example.com");
    assert_eq!(me["role"], "employee");
    assert!(me.get("password_hash").is_none(), "hash must never leak");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_and_login(&app, "luis@example.com", "employee").await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        &serde_json::json!({
            "email": "luis@example.com",
            "password": "not-the-password",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_and_login(&app, "dup@example.com", "employee").await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        &serde_json::json!({
            "email": "dup@example.com",
            "password": "another-password",
            "first_name": "Dup",
            "last_name": "User",
            "role": "employee",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_role_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/auth/register",
        None,
        &serde_json::json!({
            "email": "admin@example.com",
            "password": "some-password-123",
            "first_name": "Root",
            "last_name": "User",
            "role": "admin",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_rotates_the_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    register_and_login(&app, "rot@example.com", "employee").await;

    let login = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/login",
        None,
        &serde_json::json!({
            "email": "rot@example.com",
            "password": "correct-horse-battery",
        }),
    )
    .await;
    let auth = body_json(login).await;
    let refresh_token = auth["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds.
    let refreshed = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        &serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(refreshed.status(), StatusCode::OK);

    // Replaying the consumed token fails: the session was rotated.
    let replay = send_json(
        app,
        Method::POST,
        "/api/v1/auth/refresh",
        None,
        &serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn protected_route_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
