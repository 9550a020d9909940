//! Transactional services over the employee directory.
//!
//! - [`mutator`] -- create, update and delete one employee, each with its
//!   change-log entry, under the hierarchy lock.
//! - [`reconciler`] -- batch import with per-row isolation.

pub mod mutator;
pub mod reconciler;

use orgdir_core::employee::EmployeeDraft;
use orgdir_db::models::employee::Employee;

use crate::error::{domain_error_from_sqlx, AppError};

/// Translate a failed employee write into a domain error where one applies.
fn store_error(err: sqlx::Error, draft: &EmployeeDraft) -> AppError {
    match domain_error_from_sqlx(&err, Some(&draft.contact_email), draft.manager_id.as_deref()) {
        Some(core) => AppError::Core(core),
        None => AppError::Database(err),
    }
}

fn snapshot(employee: &Employee) -> Result<serde_json::Value, AppError> {
    employee
        .snapshot()
        .map_err(|e| AppError::InternalError(format!("Failed to snapshot employee: {e}")))
}
