//! HTTP surface: route assembly and error-to-response mapping.

pub mod employees;
pub mod health;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::EmployeeError;
use crate::metrics::{metrics_handler, track_http, AppMetrics};
use crate::repository::EmployeeRepository;
use crate::service::EmployeeService;

use self::employees::{employees_router, EmployeesApiState};

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let status = match &self {
            EmployeeError::Conflict { .. } => StatusCode::CONFLICT,
            EmployeeError::NotFound { .. } => StatusCode::NOT_FOUND,
            EmployeeError::MissingId => StatusCode::BAD_REQUEST,
            EmployeeError::Store(err) => {
                tracing::error!("Store failure: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            EmployeeError::Store(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Assemble the complete application router over `pool`.
///
/// Mounts the employee routes, `/health` and `/metrics`, and wraps them
/// with request metrics, tracing spans and permissive CORS.
pub fn build_router(pool: SqlitePool, metrics: Arc<AppMetrics>) -> Router {
    let repository = Arc::new(EmployeeRepository::new(pool.clone()));
    let service = Arc::new(EmployeeService::new(repository));

    let employees = employees_router(Arc::new(EmployeesApiState {
        service,
        metrics: Some(metrics.clone()),
    }));

    Router::new()
        .route("/health", get(health::health).with_state(pool))
        .route("/metrics", get(metrics_handler).with_state(metrics.clone()))
        .merge(employees)
        .layer(middleware::from_fn_with_state(metrics, track_http))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
