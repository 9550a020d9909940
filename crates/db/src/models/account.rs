//! Login account model and DTOs.

use orgdir_core::roles::Role;
use orgdir_core::types::{DbId, EmployeeId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `accounts` table.
///
/// Contains the password hash; use [`AccountResponse`] for API output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub employee_id: Option<EmployeeId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub email: String,
    pub role: Role,
    pub employee_id: Option<EmployeeId>,
}

impl From<&Account> for AccountResponse {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id,
            email: a.email.clone(),
            role: a.role,
            employee_id: a.employee_id.clone(),
        }
    }
}

/// DTO for creating an account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub employee_id: Option<EmployeeId>,
}
