//! End-to-end tests against the fully assembled router backed by an
//! in-memory database.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use roster_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

async fn app() -> Router {
    let db = roster_db::connect_in_memory().await.unwrap();
    let app = roster_app::boot_with(Settings::default(), db).await.unwrap();
    app.router().unwrap()
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(router, "GET", uri, None).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_department(router: &Router, short: &str, name: &str) -> i64 {
    let (status, _) = send(
        router,
        "POST",
        "/departments",
        Some(json!({ "shortName": short, "departmentName": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, all) = get_json(router, "/departments").await;
    all.as_array()
        .unwrap()
        .iter()
        .find(|d| d["shortName"] == short)
        .and_then(|d| d["departmentId"].as_i64())
        .unwrap()
}

#[tokio::test]
async fn department_created_then_fetched() {
    let router = app().await;

    let (status, body) = send(
        &router,
        "POST",
        "/departments",
        Some(json!({ "shortName": "ENG", "departmentName": "Engineering" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(String::from_utf8(body).unwrap(), "department created");

    let (_, all) = get_json(&router, "/departments").await;
    let id = all[0]["departmentId"].as_i64().unwrap();

    let (status, department) = get_json(&router, &format!("/departments/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(department["shortName"], "ENG");
    assert_eq!(department["departmentName"], "Engineering");

    let (status, count) = get_json(&router, "/departments/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, json!(1));
}

#[tokio::test]
async fn unknown_department_is_404() {
    let router = app().await;
    let (status, body) = get_json(&router, "/departments/12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn updating_missing_department_reports_success_but_writes_nothing() {
    let router = app().await;

    let (status, body) = send(
        &router,
        "PUT",
        "/departments/424242",
        Some(json!({ "shortName": "X", "departmentName": "Ghost" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "department updated");

    let (status, _) = get_json(&router, "/departments/424242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, count) = get_json(&router, "/departments/count").await;
    assert_eq!(count, json!(0));
}

#[tokio::test]
async fn department_update_and_delete() {
    let router = app().await;
    let id = create_department(&router, "HR", "Human Resources").await;

    let (status, _) = send(
        &router,
        "PUT",
        &format!("/departments/{id}"),
        Some(json!({ "departmentId": 999, "shortName": "PPL", "departmentName": "People" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, department) = get_json(&router, &format!("/departments/{id}")).await;
    assert_eq!(department["departmentId"], json!(id));
    assert_eq!(department["shortName"], "PPL");

    let (status, body) = send(&router, "DELETE", &format!("/departments/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "department deleted");

    let (status, _) = get_json(&router, &format!("/departments/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn employee_with_unknown_department_is_stored_without_one() {
    let router = app().await;

    let (status, body) = send(
        &router,
        "POST",
        "/employees",
        Some(json!({ "firstName": "Ada", "lastName": "Lovelace", "departmentId": 9999 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(String::from_utf8(body).unwrap(), "Employee created");

    let (_, employees) = get_json(&router, "/employees").await;
    let employee = &employees[0];
    assert_eq!(employee["firstName"], "Ada");
    assert_eq!(employee["lastName"], "Lovelace");
    assert!(employee["department"].is_null());
}

#[tokio::test]
async fn employee_with_known_department_carries_it() {
    let router = app().await;
    let department_id = create_department(&router, "ENG", "Engineering").await;

    let (status, _) = send(
        &router,
        "POST",
        "/employees",
        Some(json!({ "firstName": "Grace", "lastName": "Hopper", "departmentId": department_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, employees) = get_json(&router, "/employees").await;
    let id = employees[0]["employeeID"].as_i64().unwrap();

    let (status, employee) = get_json(&router, &format!("/employees/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(employee["department"]["departmentId"], json!(department_id));
    assert_eq!(employee["department"]["shortName"], "ENG");

    let (status, department) = get_json(&router, &format!("/employees/{id}/department")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(department["departmentName"], "Engineering");
}

#[tokio::test]
async fn employee_update_replaces_record_and_missing_id_is_silent() {
    let router = app().await;
    let department_id = create_department(&router, "ENG", "Engineering").await;

    send(
        &router,
        "POST",
        "/employees",
        Some(json!({ "firstName": "Ada", "lastName": "Byron", "departmentId": department_id })),
    )
    .await;
    let (_, employees) = get_json(&router, "/employees").await;
    let id = employees[0]["employeeID"].as_i64().unwrap();

    let (status, body) = send(
        &router,
        "PUT",
        &format!("/employees/{id}"),
        Some(json!({ "firstName": "Ada", "lastName": "Lovelace" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Employee updated");

    let (_, employee) = get_json(&router, &format!("/employees/{id}")).await;
    assert_eq!(employee["lastName"], "Lovelace");
    assert!(employee["department"].is_null());

    let (status, _) = get_json(&router, &format!("/employees/{id}/department")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &router,
        "PUT",
        "/employees/31337",
        Some(json!({ "firstName": "No", "lastName": "One" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, count) = get_json(&router, "/employees/count").await;
    assert_eq!(count, json!(1));
}

#[tokio::test]
async fn deleted_employee_is_404() {
    let router = app().await;
    send(
        &router,
        "POST",
        "/employees",
        Some(json!({ "firstName": "Alan", "lastName": "Turing" })),
    )
    .await;
    let (_, employees) = get_json(&router, "/employees").await;
    let id = employees[0]["employeeID"].as_i64().unwrap();

    let (status, body) = send(&router, "DELETE", &format!("/employees/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Employee deleted");

    let (status, _) = get_json(&router, &format!("/employees/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_department_in_use_is_a_server_error() {
    let router = app().await;
    let department_id = create_department(&router, "ENG", "Engineering").await;
    send(
        &router,
        "POST",
        "/employees",
        Some(json!({ "firstName": "Ada", "lastName": "Lovelace", "departmentId": department_id })),
    )
    .await;

    let (status, _) = send(&router, "DELETE", &format!("/departments/{department_id}"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn cors_preflight_allows_dev_frontend() {
    let router = app().await;

    let response = router
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/employees")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let router = app().await;

    let (status, body) = send(&router, "GET", "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");

    let (status, spec) = get_json(&router, "/docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(spec["paths"]["/departments/{id}"]["get"].is_object());
    assert!(spec["paths"]["/employees"]["post"].is_object());
    assert!(spec["components"]["schemas"]["EmployeeInput"].is_object());
}

#[tokio::test]
async fn swagger_document_lists_module_paths() {
    let router = app().await;

    let (status, spec) = get_json(&router, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(spec["openapi"], "3.1.0");
    assert!(spec["paths"]["/departments"]["get"].is_object());
    assert!(spec["paths"]["/employees/{id}/department"]["get"].is_object());
    assert!(spec["components"]["schemas"]["Employee"].is_object());
}

#[tokio::test]
async fn create_keeps_a_caller_chosen_id() {
    let router = app().await;

    let (status, _) = send(
        &router,
        "POST",
        "/departments",
        Some(json!({ "departmentId": 77, "shortName": "OPS", "departmentName": "Operations" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, department) = get_json(&router, "/departments/77").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(department["shortName"], "OPS");

    let (status, _) = send(
        &router,
        "POST",
        "/employees",
        Some(json!({ "employeeID": 500, "firstName": "Ada", "lastName": "Lovelace", "departmentId": 77 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, employee) = get_json(&router, "/employees/500").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(employee["employeeID"], json!(500));
    assert_eq!(employee["department"]["departmentId"], json!(77));

    let (_, count) = get_json(&router, "/employees/count").await;
    assert_eq!(count, json!(1));
}
