//! Change-log entity model and DTOs.
//!
//! Change-log rows are append-only; they have no `updated_at` column.

use orgdir_core::audit::{actor_label, Change, ENTITY_EMPLOYEE};
use orgdir_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single change-log entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChangeLog {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub changes: serde_json::Value,
    pub actor_id: Option<String>,
    pub created_at: Timestamp,
}

impl ChangeLog {
    /// Actor shown in the trail; `"system"` when no actor was recorded.
    pub fn actor(&self) -> &str {
        actor_label(self.actor_id.as_deref())
    }
}

/// DTO for appending a change-log entry.
#[derive(Debug, Clone)]
pub struct CreateChangeLog {
    pub entity_type: String,
    pub entity_id: String,
    pub action: String,
    pub changes: serde_json::Value,
    pub actor_id: Option<String>,
}

impl CreateChangeLog {
    /// Entry for a mutation of the employee `entity_id`.
    pub fn for_employee(
        entity_id: &str,
        change: Change,
        actor_id: Option<String>,
    ) -> Result<Self, serde_json::Error> {
        let action = change.action().to_string();
        Ok(Self {
            entity_type: ENTITY_EMPLOYEE.to_string(),
            entity_id: entity_id.to_string(),
            action,
            changes: serde_json::to_value(change.into_payload())?,
            actor_id,
        })
    }
}

/// Default page size for the change-log listing.
pub const DEFAULT_LIMIT: i64 = 200;

/// Largest page the listing will return.
pub const MAX_LIMIT: i64 = 500;

/// Pagination parameters for the change-log listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeLogQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ChangeLogQuery {
    /// Requested limit clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
