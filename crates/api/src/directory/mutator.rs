//! Single-employee mutations.
//!
//! Each operation runs in one transaction that first takes the hierarchy
//! advisory lock, so the manager map it validates against is the one it
//! commits on. The employee write and its change-log entry commit together
//! or not at all.

use orgdir_core::audit::Change;
use orgdir_core::employee::EmployeeDraft;
use orgdir_core::error::CoreError;
use orgdir_core::hierarchy::{validate_manager_assignment, validate_new_manager, ChainWalk};
use orgdir_core::roles::{authorize_create, authorize_delete, authorize_update, Actor};
use orgdir_core::types::new_employee_id;
use orgdir_db::models::change_log::CreateChangeLog;
use orgdir_db::models::employee::{Employee, UpdateEmployee};
use orgdir_db::repositories::{ChangeLogRepo, EmployeeRepo};
use orgdir_db::DbPool;

use super::{snapshot, store_error};
use crate::error::{AppError, AppResult};

/// Create an employee on behalf of `actor`.
pub async fn create_employee(
    pool: &DbPool,
    actor: &Actor,
    draft: EmployeeDraft,
) -> AppResult<Employee> {
    authorize_create(actor)?;
    let employee = insert_employee(pool, draft.normalized()?, Some(actor.audit_id())).await?;
    tracing::info!(
        employee_id = %employee.id,
        manager_id = ?employee.manager_id,
        account_id = actor.account_id,
        "Employee created"
    );
    Ok(employee)
}

/// Insert an already-normalized draft and log it with `actor_id`.
///
/// Authorization is the caller's job. Shared by single creates and import rows.
pub(crate) async fn insert_employee(
    pool: &DbPool,
    draft: EmployeeDraft,
    actor_id: Option<String>,
) -> AppResult<Employee> {
    let mut tx = pool.begin().await?;
    EmployeeRepo::lock_hierarchy(&mut tx).await?;

    let managers = EmployeeRepo::load_manager_map(&mut tx).await?;
    validate_new_manager(draft.manager_id.as_deref(), &managers)?;

    if EmployeeRepo::email_in_use(&mut tx, &draft.contact_email, None).await? {
        return Err(CoreError::DuplicateEmail {
            email: draft.contact_email,
        }
        .into());
    }

    let employee = EmployeeRepo::insert(&mut tx, &new_employee_id(), &draft)
        .await
        .map_err(|e| store_error(e, &draft))?;

    let log = CreateChangeLog::for_employee(
        &employee.id,
        Change::Create {
            after: snapshot(&employee)?,
        },
        actor_id,
    )
    .map_err(|e| AppError::InternalError(e.to_string()))?;
    ChangeLogRepo::insert(&mut tx, &log).await?;

    tx.commit().await?;
    Ok(employee)
}

/// Apply a partial update to employee `id` on behalf of `actor`.
///
/// Non-staff actors get `Forbidden` both for records they do not manage and
/// for ids that do not exist.
pub async fn update_employee(
    pool: &DbPool,
    actor: &Actor,
    id: &str,
    patch: &UpdateEmployee,
) -> AppResult<Employee> {
    let mut tx = pool.begin().await?;
    EmployeeRepo::lock_hierarchy(&mut tx).await?;

    let current = EmployeeRepo::find_for_update(&mut tx, id).await?;
    authorize_update(actor, current.as_ref().map(|e| e.manager_id.as_deref()))?;
    let current = current.ok_or_else(|| CoreError::NotFound {
        entity: "Employee",
        id: id.to_string(),
    })?;

    let draft = patch.apply_to(&current).normalized()?;

    if draft.manager_id != current.manager_id {
        let managers = EmployeeRepo::load_manager_map(&mut tx).await?;
        let assignment = validate_manager_assignment(id, draft.manager_id.as_deref(), &managers)?;
        if let ChainWalk::Bounded { steps } = assignment.walk {
            tracing::warn!(
                employee_id = %id,
                manager_id = ?assignment.manager_id,
                steps,
                "Manager chain walk hit its bound; existing data may already contain a loop"
            );
        }
    }

    if draft.contact_email != current.contact_email
        && EmployeeRepo::email_in_use(&mut tx, &draft.contact_email, Some(id)).await?
    {
        return Err(CoreError::DuplicateEmail {
            email: draft.contact_email,
        }
        .into());
    }

    let updated = EmployeeRepo::update(&mut tx, id, &draft)
        .await
        .map_err(|e| store_error(e, &draft))?
        .ok_or_else(|| {
            CoreError::ConcurrentModification(format!("Employee {id} was removed during update"))
        })?;

    let log = CreateChangeLog::for_employee(
        id,
        Change::Update {
            before: snapshot(&current)?,
            after: snapshot(&updated)?,
        },
        Some(actor.audit_id()),
    )
    .map_err(|e| AppError::InternalError(e.to_string()))?;
    ChangeLogRepo::insert(&mut tx, &log).await?;

    tx.commit().await?;
    tracing::info!(
        employee_id = %id,
        manager_id = ?updated.manager_id,
        account_id = actor.account_id,
        "Employee updated"
    );
    Ok(updated)
}

/// Delete employee `id` on behalf of `actor`.
///
/// Deleting an id that is already gone succeeds and returns `None`. Direct
/// reports of the deleted employee become roots.
pub async fn delete_employee(
    pool: &DbPool,
    actor: &Actor,
    id: &str,
) -> AppResult<Option<Employee>> {
    authorize_delete(actor)?;

    let mut tx = pool.begin().await?;
    EmployeeRepo::lock_hierarchy(&mut tx).await?;

    let Some(current) = EmployeeRepo::find_for_update(&mut tx, id).await? else {
        tracing::debug!(employee_id = %id, "Delete of missing employee treated as success");
        return Ok(None);
    };

    if !EmployeeRepo::delete(&mut tx, id).await? {
        return Ok(None);
    }

    let log = CreateChangeLog::for_employee(
        id,
        Change::Delete {
            before: snapshot(&current)?,
        },
        Some(actor.audit_id()),
    )
    .map_err(|e| AppError::InternalError(e.to_string()))?;
    ChangeLogRepo::insert(&mut tx, &log).await?;

    tx.commit().await?;
    tracing::info!(employee_id = %id, account_id = actor.account_id, "Employee deleted");
    Ok(Some(current))
}
