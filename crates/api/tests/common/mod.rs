//! Shared helpers for API integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use shelfsight_api::auth::jwt::JwtConfig;
use shelfsight_api::config::{ServerConfig, VisionSettings};
use shelfsight_api::routes;
use shelfsight_api::state::AppState;
use shelfsight_core::score::ScoringPolicy;
use shelfsight_vision::{RetryPolicy, VisionClient};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a throwaway JWT secret, and a vision endpoint nothing listens on --
/// tests exercising the analysis pipeline stub at a different level.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        image_dir: std::env::temp_dir()
            .join("shelfsight-test-images")
            .to_string_lossy()
            .into_owned(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        vision: VisionSettings {
            base_url: "http://127.0.0.1:1".to_string(),
            retry: RetryPolicy::none(),
        },
        scoring: ScoringPolicy::default(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let vision = Arc::new(VisionClient::new(
        config.vision.base_url.clone(),
        config.vision.retry.clone(),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        vision,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::page_routes(state.clone()))
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Send a GET request to the app.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Send a JSON request with the given method, optionally authenticated.
pub async fn send_json(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(
        builder
            .body(Body::from(body.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

/// Register a user with the given role and log them in.
///
/// Returns `(profile_id, access_token)`.
pub async fn register_and_login(app: &Router, email: &str, role: &str) -> (i64, String) {
    let register = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/register",
        None,
        &serde_json::json!({
            "email": email,
            "password": "correct-horse-battery",
            "first_name": "Test",
            "last_name": "User",
            "role": role,
        }),
    )
    .await;
    assert_eq!(register.status(), StatusCode::CREATED, "register failed");
    let user = body_json(register).await;
    let profile_id = user["id"].as_i64().expect("profile id");

    let login = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/auth/login",
        None,
        &serde_json::json!({
            "email": email,
            "password": "correct-horse-battery",
        }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK, "login failed");
    let auth = body_json(login).await;
    let token = auth["access_token"].as_str().expect("token").to_string();

    (profile_id, token)
}
