//! Account roles and the authorization rules the directory enforces.
//!
//! These must match the CHECK constraint on `accounts.role` in
//! `20260101000003_create_accounts.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, EmployeeId};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_HR: &str = "hr";
pub const ROLE_EMPLOYEE: &str = "employee";

/// Role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Hr => ROLE_HR,
            Self::Employee => ROLE_EMPLOYEE,
        }
    }

    /// Parse a role name. Unknown names are a validation error.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_HR => Ok(Self::Hr),
            ROLE_EMPLOYEE => Ok(Self::Employee),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Expected one of: admin, hr, employee"
            ))),
        }
    }

    /// Admin and HR manage the whole directory.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Hr)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// The authenticated caller of a mutation.
///
/// Passed explicitly into every mutator call; there is no ambient session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub account_id: DbId,
    pub role: Role,
    /// The employee record linked to the caller's account, if any.
    pub employee_id: Option<EmployeeId>,
}

impl Actor {
    /// Identifier recorded as `actor_id` on change-log entries.
    pub fn audit_id(&self) -> String {
        self.account_id.to_string()
    }
}

/// Who may create employees (single or batch import).
pub fn authorize_create(actor: &Actor) -> Result<(), CoreError> {
    if actor.role.is_staff() {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Admin or HR role required to create employees".into(),
        ))
    }
}

/// Who may delete employees.
pub fn authorize_delete(actor: &Actor) -> Result<(), CoreError> {
    if actor.role.is_staff() {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Admin or HR role required to delete employees".into(),
        ))
    }
}

/// Who may update a given employee.
///
/// `current_manager_id` is the target's manager reference before the edit,
/// or `None` as the outer option when the target does not exist. A
/// non-staff actor gets `Forbidden` for a missing record too, so the
/// response does not reveal whether the id exists.
pub fn authorize_update(
    actor: &Actor,
    current_manager_id: Option<Option<&str>>,
) -> Result<(), CoreError> {
    if actor.role.is_staff() {
        return Ok(());
    }
    let owns_record = match (current_manager_id, actor.employee_id.as_deref()) {
        (Some(Some(manager)), Some(own)) => manager == own,
        _ => false,
    };
    if owns_record {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Employees may only update their direct reports".into(),
        ))
    }
}
