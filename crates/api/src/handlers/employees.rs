//! Handlers for the `/employees` resource.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use orgdir_core::error::CoreError;
use orgdir_core::forest::{build_forest, OrgNode};
use orgdir_core::types::EmployeeId;
use orgdir_db::models::employee::{CreateEmployee, Employee, OrgChartEntry, UpdateEmployee};
use orgdir_db::repositories::EmployeeRepo;
use serde::Serialize;

use crate::directory::mutator;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::response::DataResponse;
use crate::state::AppState;

/// Forest view of the directory.
#[derive(Debug, Serialize)]
pub struct OrgChartResponse {
    pub roots: Vec<EmployeeId>,
    pub children: HashMap<EmployeeId, Vec<EmployeeId>>,
    pub tree: Vec<OrgNode<OrgChartEntry>>,
}

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Employee",
        id: id.to_string(),
    })
}

/// GET /api/v1/employees
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Employee>>>> {
    let employees = EmployeeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: employees }))
}

/// GET /api/v1/employees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let employee = EmployeeRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(employee))
}

/// POST /api/v1/employees
pub async fn create(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Json(input): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let employee = mutator::create_employee(&state.pool, &user.actor, input.into()).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// PUT /api/v1/employees/{id}
///
/// Staff may edit anyone; other accounts only their direct reports.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<Json<Employee>> {
    let employee = mutator::update_employee(&state.pool, &user.actor, &id, &input).await?;
    Ok(Json(employee))
}

/// DELETE /api/v1/employees/{id}
///
/// Always 204 for staff, whether or not the id still exists.
pub async fn delete(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    mutator::delete_employee(&state.pool, &user.actor, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/employees/org-chart
pub async fn org_chart(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<OrgChartResponse>> {
    let entries: Vec<OrgChartEntry> = EmployeeRepo::list(&state.pool)
        .await?
        .iter()
        .map(OrgChartEntry::from)
        .collect();
    let forest = build_forest(&entries);
    let tree = forest.nest(&entries);
    Ok(Json(OrgChartResponse {
        roots: forest.roots,
        children: forest.children,
        tree,
    }))
}

/// GET /api/v1/employees/{id}/eligible-managers
///
/// Everyone except the employee and the people below it.
pub async fn eligible_managers(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<Employee>>>> {
    let employees = EmployeeRepo::list(&state.pool).await?;
    if !employees.iter().any(|e| e.id == id) {
        return Err(not_found(&id));
    }

    let excluded = build_forest(&employees).descendants(&id);
    let eligible = employees
        .into_iter()
        .filter(|e| e.id != id && !excluded.contains(&e.id))
        .collect();
    Ok(Json(DataResponse { data: eligible }))
}
