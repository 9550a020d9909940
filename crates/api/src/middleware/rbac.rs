//! Role gates layered on top of [`AuthUser`].
//!
//! Only coarse, record-independent checks live here. Rules that depend on
//! the target employee (a manager editing a direct report) are decided by
//! the directory services once the record is loaded.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use orgdir_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Admin or HR. Everyone else gets 403.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.actor.role.is_staff() {
            Ok(RequireStaff(user))
        } else {
            tracing::debug!(
                account_id = user.actor.account_id,
                role = %user.actor.role,
                "Staff-only route refused"
            );
            Err(CoreError::Forbidden("Admin or HR role required".into()).into())
        }
    }
}

/// Any signed-in account, read-only directory access.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_request_parts(parts, state)
            .await
            .map(RequireAuth)
    }
}
