#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use orgdir_api::auth::jwt::{issue_token, JwtConfig};
use orgdir_api::auth::password::hash_password;
use orgdir_api::config::ServerConfig;
use orgdir_api::router::build_app_router;
use orgdir_api::state::AppState;
use orgdir_core::roles::{Actor, Role};
use orgdir_db::models::account::{Account, CreateAccount};
use orgdir_db::repositories::AccountRepo;

pub const TEST_PASSWORD: &str = "test_password_123!";

fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        access_token_expiry_mins: 15,
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        max_import_bytes: 64 * 1024,
        seed_demo_data: false,
        jwt: jwt_config(),
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint a token directly, without a round trip through `/auth/login`.
pub fn token_for(account_id: i64, role: Role, employee_id: Option<&str>) -> String {
    let actor = Actor {
        account_id,
        role,
        employee_id: employee_id.map(str::to_string),
    };
    issue_token(&actor, &jwt_config()).unwrap()
}

pub fn staff_token() -> String {
    token_for(1, Role::Hr, None)
}

/// Insert an account with [`TEST_PASSWORD`].
pub async fn create_account(
    pool: &PgPool,
    email: &str,
    role: Role,
    employee_id: Option<&str>,
) -> Account {
    let input = CreateAccount {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role,
        employee_id: employee_id.map(str::to_string),
    };
    AccountRepo::create(pool, &input).await.unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, bare_request("GET", uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, bare_request("GET", uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("POST", uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, bare_request("POST", uri, Some(token))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request("PUT", uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, bare_request("DELETE", uri, Some(token))).await
}

/// POST a multipart form with a single CSV `file` field.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    filename: &str,
    contents: &str,
    token: &str,
) -> Response<Body> {
    post_bytes_auth(app, uri, filename, "text/csv", contents.as_bytes(), token).await
}

/// POST a multipart form with a single `file` field of arbitrary bytes.
pub async fn post_bytes_auth(
    app: Router,
    uri: &str,
    filename: &str,
    content_type: &str,
    contents: &[u8],
    token: &str,
) -> Response<Body> {
    let boundary = "orgdir-test-boundary";
    let mut body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={boundary}"))
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal valid create body.
pub fn employee_body(name: &str, email: &str, manager_id: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "title": "Engineer",
        "department": "Engineering",
        "manager_id": manager_id,
        "contact_email": email,
        "hire_date": "2024-05-01",
        "salary": 100000,
        "status": "active",
    })
}

/// Create an employee through the API as staff and return its id.
pub async fn create_employee(
    app: Router,
    name: &str,
    email: &str,
    manager_id: Option<&str>,
) -> String {
    let response = post_json_auth(
        app,
        "/api/v1/employees",
        employee_body(name, email, manager_id),
        &staff_token(),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}
