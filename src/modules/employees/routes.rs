//! HTTP handlers for `/employees`.

use axum::{
    extract::Path,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use roster_http::error::AppError;

use super::models::{Employee, EmployeeInput};
use super::resolver::resolve;
use super::service::EmployeeService;
use crate::modules::departments::{models::Department, service::DepartmentService};

pub fn router(employees: EmployeeService, departments: DepartmentService) -> Router {
    Router::new()
        .route("/employees/count", get(count))
        .route("/employees", get(list).post(create))
        .route("/employees/{id}", get(fetch).put(update).delete(remove))
        .route("/employees/{id}/department", get(fetch_department))
        .layer(Extension(employees))
        .layer(Extension(departments))
}

/// Look up the referenced department, then build the employee to store.
async fn resolve_input(
    departments: &DepartmentService,
    input: EmployeeInput,
) -> anyhow::Result<Employee> {
    let department = departments.get_by_ref(input.department_id).await?;
    if department.is_none() {
        if let Some(department_id) = input.department_id {
            tracing::warn!(department_id, "department reference did not resolve; dropped");
        }
    }
    Ok(resolve(input, department))
}

async fn count(Extension(svc): Extension<EmployeeService>) -> Result<Json<i64>, AppError> {
    Ok(Json(svc.count().await?))
}

async fn list(Extension(svc): Extension<EmployeeService>) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(svc.list_all().await?))
}

async fn fetch(
    Extension(svc): Extension<EmployeeService>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, AppError> {
    svc.get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("employee {} not found", id)))
}

async fn fetch_department(
    Extension(svc): Extension<EmployeeService>,
    Path(id): Path<i64>,
) -> Result<Json<Department>, AppError> {
    svc.get_department_of(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no department for employee {}", id)))
}

async fn create(
    Extension(svc): Extension<EmployeeService>,
    Extension(departments): Extension<DepartmentService>,
    Json(input): Json<EmployeeInput>,
) -> Result<(StatusCode, &'static str), AppError> {
    let employee = resolve_input(&departments, input).await?;
    svc.add(employee).await?;
    Ok((StatusCode::CREATED, "Employee created"))
}

async fn update(
    Extension(svc): Extension<EmployeeService>,
    Extension(departments): Extension<DepartmentService>,
    Path(id): Path<i64>,
    Json(input): Json<EmployeeInput>,
) -> Result<&'static str, AppError> {
    let employee = resolve_input(&departments, input).await?;
    svc.update(id, employee).await?;
    Ok("Employee updated")
}

async fn remove(
    Extension(svc): Extension<EmployeeService>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    svc.delete_by_id(id).await?;
    Ok("Employee deleted")
}
