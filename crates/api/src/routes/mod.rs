pub mod auth;
pub mod change_log;
pub mod employees;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                          create account (public)
/// /auth/login                           login (public)
/// /auth/logout                          logout (requires auth)
/// /auth/me                              current account (requires auth)
/// /auth/me/link-employee                link account to employee by email
///
/// /employees                            list, create (create: admin|hr)
/// /employees/org-chart                  roots, children and nested tree
/// /employees/export                     CSV or JSON export
/// /employees/import                     batch import (admin|hr)
/// /employees/{id}                       get, update, delete (delete: admin|hr)
/// /employees/{id}/eligible-managers     valid manager choices for {id}
/// /employees/{id}/history               change-log entries for {id} (admin|hr)
///
/// /change-log                           audit trail, paged (admin|hr)
/// /change-log/{id}                      single entry (admin|hr)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/employees", employees::router())
        .nest("/change-log", change_log::router())
}
