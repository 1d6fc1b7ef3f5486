//! Integration tests for the task workflow: assignment, pending list,
//! completion, and ownership checks.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{body_json, get_auth, register_and_login, send_json};
use sqlx::PgPool;

/// Create a store, planogram, and shelf via the API; returns the shelf id.
async fn seed_shelf(app: &Router, supervisor: &str) -> i64 {
    let store = body_json(
        send_json(
            app.clone(),
            Method::POST,
            "/api/v1/stores",
            Some(supervisor),
            &serde_json::json!({ "name": "Centro", "address": "Av. 1", "manager_id": null }),
        )
        .await,
    )
    .await;

    let planogram = body_json(
        send_json(
            app.clone(),
            Method::POST,
            "/api/v1/planograms",
            Some(supervisor),
            &serde_json::json!({
                "name": "Beverages v2",
                "category": "beverages",
                "department": "Drinks",
            }),
        )
        .await,
    )
    .await;

    let shelf = body_json(
        send_json(
            app.clone(),
            Method::POST,
            "/api/v1/shelves",
            Some(supervisor),
            &serde_json::json!({
                "name": "Shelf 1",
                "store_id": store["id"],
                "planogram_id": planogram["id"],
            }),
        )
        .await,
    )
    .await;

    shelf["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assign_and_complete_task(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, supervisor) = register_and_login(&app, "sup@example.com", "supervisor").await;
    let (employee_id, employee) = register_and_login(&app, "emp@example.com", "employee").await;
    let shelf_id = seed_shelf(&app, &supervisor).await;

    let created = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/tasks",
        Some(&supervisor),
        &serde_json::json!({
            "employee_id": employee_id,
            "shelf_id": shelf_id,
            "title": "Verify beverages shelf",
            "description": "Morning restock check",
            "priority": "high",
        }),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let task = body_json(created).await;
    let task_id = task["id"].as_i64().unwrap();
    assert_eq!(task["status"], "pending");

    // The employee sees it in the pending list, joined with shelf context.
    let pending = body_json(get_auth(app.clone(), "/api/v1/tasks/pending", &employee).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);
    assert_eq!(pending[0]["shelf_name"], "Shelf 1");
    assert_eq!(pending[0]["planogram_name"], "Beverages v2");

    // Completing stamps the timestamp and clears the pending list.
    let completed = send_json(
        app.clone(),
        Method::POST,
        &format!("/api/v1/tasks/{task_id}/complete"),
        Some(&employee),
        &serde_json::json!({}),
    )
    .await;
    assert_eq!(completed.status(), StatusCode::OK);
    let done = body_json(completed).await;
    assert_eq!(done["status"], "completed");
    assert!(!done["completed_at"].is_null());

    let pending_after =
        body_json(get_auth(app, "/api/v1/tasks/pending", &employee).await).await;
    assert!(pending_after.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn employee_cannot_touch_anothers_task(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, supervisor) = register_and_login(&app, "sup2@example.com", "supervisor").await;
    let (owner_id, _) = register_and_login(&app, "owner@example.com", "employee").await;
    let (_, intruder) = register_and_login(&app, "intruder@example.com", "employee").await;
    let shelf_id = seed_shelf(&app, &supervisor).await;

    let task = body_json(
        send_json(
            app.clone(),
            Method::POST,
            "/api/v1/tasks",
            Some(&supervisor),
            &serde_json::json!({
                "employee_id": owner_id,
                "shelf_id": shelf_id,
                "title": "Private task",
            }),
        )
        .await,
    )
    .await;
    let task_id = task["id"].as_i64().unwrap();

    let response = send_json(
        app,
        Method::POST,
        &format!("/api/v1/tasks/{task_id}/complete"),
        Some(&intruder),
        &serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn employee_cannot_create_tasks(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (employee_id, employee) = register_and_login(&app, "solo@example.com", "employee").await;

    let response = send_json(
        app,
        Method::POST,
        "/api/v1/tasks",
        Some(&employee),
        &serde_json::json!({
            "employee_id": employee_id,
            "shelf_id": 1,
            "title": "Self-assigned",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
