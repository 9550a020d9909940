//! Route definitions for the `/employees` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{change_log, employees, import_export};
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /org-chart                 -> org_chart
/// GET    /export                    -> export
/// POST   /import                    -> import
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /{id}/eligible-managers    -> eligible_managers
/// GET    /{id}/history              -> change_log::employee_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employees::list).post(employees::create))
        .route("/org-chart", get(employees::org_chart))
        .route("/export", get(import_export::export))
        .route("/import", post(import_export::import))
        .route(
            "/{id}",
            get(employees::get_by_id)
                .put(employees::update)
                .delete(employees::delete),
        )
        .route("/{id}/eligible-managers", get(employees::eligible_managers))
        .route("/{id}/history", get(change_log::employee_history))
}
