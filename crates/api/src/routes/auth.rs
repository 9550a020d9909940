//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup               -> signup
/// POST /login                -> login
/// POST /logout               -> logout (requires auth)
/// GET  /me                   -> me (requires auth)
/// POST /me/link-employee     -> link_employee (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/me/link-employee", post(auth::link_employee))
}
