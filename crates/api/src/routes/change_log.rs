//! Route definitions for the `/change-log` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::change_log;
use crate::state::AppState;

/// Routes mounted at `/change-log`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(change_log::list))
        .route("/{id}", get(change_log::get_by_id))
}
