//! Integration tests for batch employee import.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_employee, post_bytes_auth, post_file_auth, post_json_auth, staff_token,
    token_for,
};
use orgdir_core::roles::Role;
use orgdir_core::workbook::{write_workbook, SheetCell};
use orgdir_db::repositories::{ChangeLogRepo, EmployeeRepo};
use serde_json::json;
use sqlx::PgPool;

const HEADER: &str = "name,title,department,manager_id,contact_email,contact_phone,hire_date,salary,status";

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_row_fails_alone(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_employee(app.clone(), "Existing", "taken@example.com", None).await;

    let csv = format!(
        "{HEADER}\n\
         Ann,Engineer,Eng,,ann@example.com,,2024-01-02,100000,active\n\
         Bob,Engineer,Eng,,taken@example.com,,2024-01-02,100000,active\n\
         Cid,Engineer,Eng,,cid@example.com,,2024-01-02,100000,leave\n"
    );
    let response =
        post_file_auth(app, "/api/v1/employees/import", "people.csv", &csv, &staff_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 3);
    assert_eq!(json["inserted"], 2);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["errors"].as_array().unwrap().len(), 1);
    // Header is line 1, so the second data row is line 3.
    assert_eq!(json["errors"][0]["row"], 3);
    assert!(json["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("taken@example.com"));

    assert_eq!(EmployeeRepo::list(&pool).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn imported_rows_are_logged_with_import_actor(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let rows = json!({"rows": [
        ["Name", "Title", "Department", "Contact_Email", "Hire_Date", "Salary", "Status"],
        ["Ann", "Engineer", "Eng", "ann@example.com", "2024-01-02T00:00:00Z", "99999.6", "Active"],
    ]});

    let response = post_json_auth(app, "/api/v1/employees/import", rows, &staff_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["inserted"], 1);

    let ann = EmployeeRepo::find_by_email(&pool, "ann@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ann.salary, 100_000);

    let logs = ChangeLogRepo::list_for_entity(&pool, "Employee", &ann.id)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "create");
    assert_eq!(logs[0].actor_id.as_deref(), Some("import"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn json_rows_accept_numeric_and_null_cells(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let rows = json!({"rows": [
        ["name", "title", "department", "contact_email", "contact_phone", "hire_date", "salary", "status"],
        ["Ann", "Engineer", "Eng", "ann@example.com", null, "2024-01-02", 125000, "active"],
        ["Bob", "Engineer", "Eng", "bob@example.com", 5551234, "2024-01-02", 99999.6, "active"],
    ]});

    let response = post_json_auth(app, "/api/v1/employees/import", rows, &staff_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["inserted"], 2);
    assert_eq!(json["failed"], 0);

    let ann = EmployeeRepo::find_by_email(&pool, "ann@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ann.salary, 125_000);
    assert_eq!(ann.contact_phone, None);

    let bob = EmployeeRepo::find_by_email(&pool, "bob@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bob.salary, 100_000);
    assert_eq!(bob.contact_phone.as_deref(), Some("5551234"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn xlsx_upload_is_imported(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let header = ["name", "title", "department", "contact_email", "hire_date", "salary", "status"];
    let row = |name: &str, email: &str, salary: f64| {
        vec![
            SheetCell::from(name),
            SheetCell::from("Engineer"),
            SheetCell::from("Eng"),
            SheetCell::from(email),
            SheetCell::from("2024-01-02"),
            SheetCell::Number(salary),
            SheetCell::from("active"),
        ]
    };
    let bytes = write_workbook(
        "People",
        &header,
        &[row("Ann", "ann@example.com", 120_000.0), row("Bob", "bob@example.com", 95_000.0)],
    )
    .unwrap();

    let response = post_bytes_auth(
        app,
        "/api/v1/employees/import",
        "people.xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        &bytes,
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["inserted"], 2);

    let ann = EmployeeRepo::find_by_email(&pool, "ann@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ann.salary, 120_000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unreadable_uploads_return_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_bytes_auth(
        app.clone(),
        "/api/v1/employees/import",
        "people.xlsx",
        "application/octet-stream",
        b"PK\x03\x04truncated",
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_bytes_auth(
        app,
        "/api/v1/employees/import",
        "people.bin",
        "application/octet-stream",
        &[0xff, 0xfe, 0x00, 0x81],
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rows_cannot_reference_managers_from_the_same_batch(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let boss = create_employee(app.clone(), "Boss", "boss@example.com", None).await;

    let rows = json!({"rows": [
        ["id", "name", "title", "department", "manager_id", "contact_email", "hire_date", "salary", "status"],
        ["new-1", "Ann", "Engineer", "Eng", boss, "ann@example.com", "2024-01-02", "1", "active"],
        ["new-2", "Bob", "Engineer", "Eng", "new-1", "bob@example.com", "2024-01-02", "1", "active"],
    ]});

    let response = post_json_auth(app, "/api/v1/employees/import", rows, &staff_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["inserted"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["errors"][0]["row"], 3);

    let ann = EmployeeRepo::find_by_email(&pool, "ann@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ann.manager_id.as_deref(), Some(boss.as_str()));
    assert_ne!(ann.id, "new-1", "the id column is ignored");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_rows_are_skipped_silently(pool: PgPool) {
    let app = common::build_test_app(pool);
    let rows = json!({"rows": [
        ["name", "title", "department", "contact_email", "hire_date", "salary", "status"],
        ["Ann", "Engineer", "Eng", "ann@example.com", "2024-01-02", "100", "active"],
        ["", "Engineer", "Eng", "nobody@example.com", "2024-01-02", "100", "active"],
        ["Bob", "Engineer", "Eng", "bob@example.com", "not a date", "100", "active"],
        ["Cid", "Engineer", "Eng", "cid@example.com", "2024-01-02", "-5", "active"],
        ["Dee", "Engineer", "Eng", "dee@example.com", "2024-01-02", "100", "retired"],
    ]});

    let response = post_json_auth(app, "/api/v1/employees/import", rows, &staff_token()).await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["inserted"], 1);
    assert_eq!(json["failed"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn sheet_level_problems_return_400(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/employees/import",
        json!({"rows": []}),
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Empty file");

    let response = post_json_auth(
        app.clone(),
        "/api/v1/employees/import",
        json!({"rows": [["name", "title"]]}),
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json_auth(
        app,
        "/api/v1/employees/import",
        json!({"rows": [
            ["name", "title", "department", "contact_email", "hire_date", "salary", "status"],
            ["", "", "", "", "", "", ""],
        ]}),
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No valid rows found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn import_requires_staff(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/employees/import",
        json!({"rows": []}),
        &token_for(5, Role::Employee, None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn error_list_is_capped(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    create_employee(app.clone(), "Existing", "taken@example.com", None).await;

    let mut rows = vec![json!([
        "name", "title", "department", "contact_email", "hire_date", "salary", "status"
    ])];
    for i in 0..60 {
        rows.push(json!([
            format!("Dup {i}"), "Engineer", "Eng", "taken@example.com", "2024-01-02", "1", "active"
        ]));
    }

    let response = post_json_auth(
        app,
        "/api/v1/employees/import",
        json!({ "rows": rows }),
        &staff_token(),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["failed"], 60);
    assert_eq!(json["inserted"], 0);
    assert_eq!(json["errors"].as_array().unwrap().len(), 50);
    assert_eq!(json["errors"][0]["row"], 2);
    assert_eq!(ChangeLogRepo::count(&pool).await.unwrap(), 1);
}
