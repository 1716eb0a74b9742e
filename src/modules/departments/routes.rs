//! HTTP handlers for `/departments`.

use axum::{
    extract::Path,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use roster_http::error::AppError;

use super::models::Department;
use super::service::DepartmentService;

pub fn router(service: DepartmentService) -> Router {
    Router::new()
        .route("/departments/count", get(count))
        .route("/departments", get(list).post(create))
        .route(
            "/departments/{id}",
            get(fetch).put(update).delete(remove),
        )
        .layer(Extension(service))
}

async fn count(Extension(svc): Extension<DepartmentService>) -> Result<Json<i64>, AppError> {
    Ok(Json(svc.count().await?))
}

async fn list(
    Extension(svc): Extension<DepartmentService>,
) -> Result<Json<Vec<Department>>, AppError> {
    Ok(Json(svc.list_all().await?))
}

async fn fetch(
    Extension(svc): Extension<DepartmentService>,
    Path(id): Path<i64>,
) -> Result<Json<Department>, AppError> {
    svc.get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("department {} not found", id)))
}

async fn create(
    Extension(svc): Extension<DepartmentService>,
    Json(department): Json<Department>,
) -> Result<(StatusCode, &'static str), AppError> {
    svc.add(department).await?;
    Ok((StatusCode::CREATED, "department created"))
}

// A missing id still answers 200; the service logs the skipped write.
async fn update(
    Extension(svc): Extension<DepartmentService>,
    Path(id): Path<i64>,
    Json(department): Json<Department>,
) -> Result<&'static str, AppError> {
    svc.update(id, department).await?;
    Ok("department updated")
}

async fn remove(
    Extension(svc): Extension<DepartmentService>,
    Path(id): Path<i64>,
) -> Result<&'static str, AppError> {
    svc.delete_by_id(id).await?;
    Ok("department deleted")
}
