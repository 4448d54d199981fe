//! CRUD endpoints for employees.
//!
//! Routes:
//! - `POST   /api/employees`      — create (201, 409 on duplicate email)
//! - `GET    /api/employees`      — list all
//! - `GET    /api/employees/:id`  — fetch one (404 if absent)
//! - `PUT    /api/employees/:id`  — overwrite fields (404 if absent)
//! - `DELETE /api/employees/:id`  — remove (200 even if absent)

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::error::EmployeeError;
use crate::metrics::AppMetrics;
use crate::model::Employee;
use crate::service::EmployeeService;

/// Base path of the employee resource.
pub const EMPLOYEES_PATH: &str = "/api/employees";

/// Body returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Employee deleted successfully!";

/// Shared state type for the employee routes.
pub type EmployeesState = Arc<EmployeesApiState>;

#[derive(Clone)]
pub struct EmployeesApiState {
    pub service: Arc<EmployeeService>,
    pub metrics: Option<Arc<AppMetrics>>,
}

impl EmployeesApiState {
    fn count_conflict(&self, err: &EmployeeError) {
        if let (Some(metrics), EmployeeError::Conflict { .. }) = (&self.metrics, err) {
            metrics.email_conflicts_total.inc();
        }
    }
}

/// Router serving every employee route under [`EMPLOYEES_PATH`].
pub fn employees_router(state: EmployeesState) -> Router {
    Router::new()
        .route(EMPLOYEES_PATH, get(list_employees).post(create_employee))
        .route(
            "/api/employees/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .with_state(state)
}

/// `POST /api/employees`
pub async fn create_employee(
    State(state): State<EmployeesState>,
    Json(body): Json<Employee>,
) -> Result<(StatusCode, Json<Employee>), EmployeeError> {
    let saved = state.service.create(body).await.inspect_err(|err| {
        state.count_conflict(err);
    })?;

    if let Some(metrics) = &state.metrics {
        metrics.employees_created_total.inc();
    }

    Ok((StatusCode::CREATED, Json(saved)))
}

/// `GET /api/employees`
pub async fn list_employees(
    State(state): State<EmployeesState>,
) -> Result<Json<Vec<Employee>>, EmployeeError> {
    let employees = state.service.list().await?;
    Ok(Json(employees))
}

/// `GET /api/employees/:id`
pub async fn get_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, EmployeeError> {
    state
        .service
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| EmployeeError::not_found(id))
}

/// `PUT /api/employees/:id`
///
/// Checks existence first and answers 404 without touching the row.
/// The stored id is kept; any `id` in the body is ignored.
pub async fn update_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i64>,
    Json(body): Json<Employee>,
) -> Result<Json<Employee>, EmployeeError> {
    let existing = state
        .service
        .get_by_id(id)
        .await?
        .ok_or_else(|| EmployeeError::not_found(id))?;

    let candidate = Employee {
        id: existing.id,
        first_name: body.first_name,
        last_name: body.last_name,
        email: body.email,
    };

    let updated = state.service.update(candidate).await.inspect_err(|err| {
        state.count_conflict(err);
    })?;

    Ok(Json(updated))
}

/// `DELETE /api/employees/:id`
pub async fn delete_employee(
    State(state): State<EmployeesState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, &'static str), EmployeeError> {
    state.service.delete_by_id(id).await?;
    Ok((StatusCode::OK, DELETED_MESSAGE))
}
