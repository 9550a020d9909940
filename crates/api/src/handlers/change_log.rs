//! Handlers for the `/change-log` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use orgdir_core::audit::ENTITY_EMPLOYEE;
use orgdir_core::error::CoreError;
use orgdir_core::types::{DbId, Timestamp};
use orgdir_db::models::change_log::{ChangeLog, ChangeLogQuery};
use orgdir_db::repositories::ChangeLogRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::query::PaginationParams;
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// A change-log entry as shown to staff.
#[derive(Debug, Serialize)]
pub struct ChangeLogEntry {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub changes: serde_json::Value,
    pub actor_id: Option<String>,
    /// `actor_id`, or `"system"` when none was recorded.
    pub actor: String,
    pub created_at: Timestamp,
}

impl From<ChangeLog> for ChangeLogEntry {
    fn from(log: ChangeLog) -> Self {
        let actor = log.actor().to_string();
        Self {
            id: log.id,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            action: log.action,
            changes: log.changes,
            actor_id: log.actor_id,
            actor,
            created_at: log.created_at,
        }
    }
}

/// GET /api/v1/change-log
///
/// Newest first. `limit` defaults to 200 and is capped at 500.
pub async fn list(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<ChangeLogEntry>>> {
    let query = ChangeLogQuery {
        limit: params.limit,
        offset: params.offset,
    };
    let entries = ChangeLogRepo::list(&state.pool, &query)
        .await?
        .into_iter()
        .map(ChangeLogEntry::from)
        .collect();
    let total = ChangeLogRepo::count(&state.pool).await?;
    Ok(Json(PageResponse {
        data: entries,
        total,
        limit: query.limit(),
        offset: query.offset(),
    }))
}

/// GET /api/v1/change-log/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChangeLogEntry>>> {
    let entry = ChangeLogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "ChangeLog",
            id: id.to_string(),
        })?;
    Ok(Json(DataResponse {
        data: entry.into(),
    }))
}

/// GET /api/v1/employees/{id}/history
///
/// Every entry recorded against one employee, oldest first. Works for
/// deleted employees too, so an empty list is not a 404.
pub async fn employee_history(
    State(state): State<AppState>,
    RequireStaff(_user): RequireStaff,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Vec<ChangeLogEntry>>>> {
    let entries = ChangeLogRepo::list_for_entity(&state.pool, ENTITY_EMPLOYEE, &id)
        .await?
        .into_iter()
        .map(ChangeLogEntry::from)
        .collect();
    Ok(Json(DataResponse { data: entries }))
}
