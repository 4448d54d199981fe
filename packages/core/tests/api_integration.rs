//! Integration tests for all API endpoints.
//!
//! Each test boots the full Axum router (same assembly as `main.rs`) over
//! an in-memory SQLite pool with migrations applied, and drives it with
//! `tower::ServiceExt::oneshot`, so no live server is needed.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use employee_service::{
    api::{self, employees::EMPLOYEES_PATH},
    db,
    metrics::AppMetrics,
    repository::{EmployeeRepository, EmployeeStore},
};

// ---- Helpers ----------------------------------------------------------------

/// Build the complete router and hand back the pool for direct assertions.
async fn build_test_app() -> (Router, SqlitePool) {
    let pool = db::create_pool("sqlite::memory:").await.unwrap();
    let metrics = Arc::new(AppMetrics::new().unwrap());
    (api::build_router(pool.clone(), metrics), pool)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Body) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    (resp.status(), resp.into_body())
}

/// Convenience: collect body bytes and parse as JSON.
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn row_count(pool: &SqlitePool) -> i64 {
    EmployeeRepository::new(pool.clone()).count().await.unwrap()
}

fn employee_json(first: &str, last: &str, email: &str) -> Value {
    json!({ "firstName": first, "lastName": last, "email": email })
}

// ---- GET /health ------------------------------------------------------------

#[tokio::test]
async fn health_returns_200_with_ok_body() {
    let (app, _pool) = build_test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let bytes = body.collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

// ---- Full lifecycle -----------------------------------------------------------

#[tokio::test]
async fn create_conflict_get_delete_lifecycle() {
    let (app, pool) = build_test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        EMPLOYEES_PATH,
        Some(employee_json("Furkan", "Uzun", "a@x.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = json_body(body).await;
    assert_eq!(created["id"], 1);

    let (status, _) = send(
        &app,
        Method::POST,
        EMPLOYEES_PATH,
        Some(employee_json("Someone", "Else", "a@x.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(row_count(&pool).await, 1);

    let (status, body) = send(&app, Method::GET, "/api/employees/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(body).await, created);

    let (status, _) = send(&app, Method::DELETE, "/api/employees/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/api/employees/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_every_created_employee() {
    let (app, _pool) = build_test_app().await;

    for (first, email) in [("Furkan", "furkan@hotmail.com"), ("deneme", "deneme@hotmail.com")] {
        let (status, _) = send(
            &app,
            Method::POST,
            EMPLOYEES_PATH,
            Some(employee_json(first, "Uzun", email)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, Method::GET, EMPLOYEES_PATH, None).await;
    assert_eq!(status, StatusCode::OK);
    let list = json_body(body).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 2);

    for item in items {
        let uri = format!("{}/{}", EMPLOYEES_PATH, item["id"]);
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&json_body(body).await, item);
    }
}

#[tokio::test]
async fn update_overwrites_and_is_visible_on_read() {
    let (app, _pool) = build_test_app().await;
    send(
        &app,
        Method::POST,
        EMPLOYEES_PATH,
        Some(employee_json("Furkan", "Uzun", "frknuzn34@hotmail.com")),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/employees/1",
        Some(employee_json("Ramesh", "Fadatare", "ram@gmail.com")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated = json_body(body).await;
    assert_eq!(updated["firstName"], "Ramesh");

    let (_, body) = send(&app, Method::GET, "/api/employees/1", None).await;
    let stored = json_body(body).await;
    assert_eq!(stored["firstName"], "Ramesh");
    assert_eq!(stored["lastName"], "Fadatare");
    assert_eq!(stored["email"], "ram@gmail.com");
}

#[tokio::test]
async fn update_of_absent_employee_returns_404() {
    let (app, pool) = build_test_app().await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/employees/1",
        Some(employee_json("Ramesh", "Fadatare", "ram@gmail.com")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(row_count(&pool).await, 0);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (app, pool) = build_test_app().await;
    send(
        &app,
        Method::POST,
        EMPLOYEES_PATH,
        Some(employee_json("Furkan", "Uzun", "frknuzn34@hotmail.com")),
    )
    .await;

    let (first, _) = send(&app, Method::DELETE, "/api/employees/1", None).await;
    let (second, _) = send(&app, Method::DELETE, "/api/employees/1", None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(row_count(&pool).await, 0);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let (app, _pool) = build_test_app().await;
    let (status, _) = send(&app, Method::GET, "/api/employees/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---- GET /metrics -------------------------------------------------------------

#[tokio::test]
async fn metrics_reflect_employee_traffic() {
    let (app, _pool) = build_test_app().await;
    let payload = employee_json("Furkan", "Uzun", "frknuzn34@hotmail.com");
    send(&app, Method::POST, EMPLOYEES_PATH, Some(payload.clone())).await;
    send(&app, Method::POST, EMPLOYEES_PATH, Some(payload)).await;

    let (status, body) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::OK);
    let bytes = body.collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(text.contains("employee_service_employees_created_total 1"));
    assert!(text.contains("employee_service_email_conflicts_total 1"));
    assert!(text.contains("employee_service_http_requests_total"));
}
