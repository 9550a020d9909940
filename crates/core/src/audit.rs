//! Change-log constants and payload shapes.
//!
//! Every employee mutation appends exactly one change-log entry carrying a
//! `before` snapshot, an `after` snapshot, or both, depending on the action.

use serde::{Deserialize, Serialize};

/// Entity type tag recorded for employee mutations.
pub const ENTITY_EMPLOYEE: &str = "Employee";

/// Actor id recorded for rows inserted by a batch import.
pub const ACTOR_IMPORT: &str = "import";

/// Display name for entries without an actor.
pub const ACTOR_SYSTEM: &str = "system";

/// Known change-log actions. Must match the CHECK on `change_logs.action`.
pub mod actions {
    pub const CREATE: &str = "create";
    pub const UPDATE: &str = "update";
    pub const DELETE: &str = "delete";
}

/// A mutation's kind together with the snapshots it must carry.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Create { after: serde_json::Value },
    Update {
        before: serde_json::Value,
        after: serde_json::Value,
    },
    Delete { before: serde_json::Value },
}

impl Change {
    pub fn action(&self) -> &'static str {
        match self {
            Change::Create { .. } => actions::CREATE,
            Change::Update { .. } => actions::UPDATE,
            Change::Delete { .. } => actions::DELETE,
        }
    }

    /// The JSON stored in `change_logs.changes`.
    pub fn into_payload(self) -> ChangePayload {
        match self {
            Change::Create { after } => ChangePayload {
                before: None,
                after: Some(after),
            },
            Change::Update { before, after } => ChangePayload {
                before: Some(before),
                after: Some(after),
            },
            Change::Delete { before } => ChangePayload {
                before: Some(before),
                after: None,
            },
        }
    }
}

/// Serialized form of a change: absent snapshots are omitted entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
}

/// Actor label shown in the audit trail.
pub fn actor_label(actor_id: Option<&str>) -> &str {
    actor_id.unwrap_or(ACTOR_SYSTEM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_carries_only_after() {
        let change = Change::Create { after: json!({"id": "1"}) };
        assert_eq!(change.action(), actions::CREATE);
        let payload = serde_json::to_value(change.into_payload()).unwrap();
        assert_eq!(payload, json!({"after": {"id": "1"}}));
    }

    #[test]
    fn update_carries_both() {
        let change = Change::Update {
            before: json!({"name": "a"}),
            after: json!({"name": "b"}),
        };
        assert_eq!(change.action(), actions::UPDATE);
        let payload = change.into_payload();
        assert_eq!(payload.before, Some(json!({"name": "a"})));
        assert_eq!(payload.after, Some(json!({"name": "b"})));
    }

    #[test]
    fn delete_carries_only_before() {
        let change = Change::Delete { before: json!({"id": "1"}) };
        assert_eq!(change.action(), actions::DELETE);
        let payload = serde_json::to_value(change.into_payload()).unwrap();
        assert_eq!(payload, json!({"before": {"id": "1"}}));
    }

    #[test]
    fn missing_actor_is_system() {
        assert_eq!(actor_label(None), "system");
        assert_eq!(actor_label(Some("12")), "12");
    }
}
