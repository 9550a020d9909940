//! Batch import of employees with per-row isolation.

use orgdir_core::audit::ACTOR_IMPORT;
use orgdir_core::employee::EmployeeDraft;
use orgdir_core::hierarchy::{validate_new_manager, ManagerMap};
use orgdir_core::import::{parse_sheet, ImportReport, ImportRow};
use orgdir_core::roles::{authorize_create, Actor};
use orgdir_db::repositories::EmployeeRepo;
use orgdir_db::DbPool;

use super::mutator::insert_employee;
use crate::error::{AppError, AppResult};

/// Parse a decoded sheet and create one employee per usable row.
///
/// Sheet-level problems (empty sheet, missing headers, no usable rows) fail
/// the whole call. After that every row stands alone: a failed row is
/// recorded in the report and the next row is attempted.
pub async fn import_sheet(
    pool: &DbPool,
    actor: &Actor,
    sheet: &[Vec<String>],
) -> AppResult<ImportReport> {
    authorize_create(actor)?;
    let rows = parse_sheet(sheet)?;
    reconcile_import(pool, actor, rows).await
}

/// Create each row in its own transaction.
///
/// Manager references resolve against the directory as it stood before the
/// batch, so a row cannot point at another row of the same batch.
pub async fn reconcile_import(
    pool: &DbPool,
    actor: &Actor,
    rows: Vec<ImportRow>,
) -> AppResult<ImportReport> {
    authorize_create(actor)?;

    let existing: ManagerMap = EmployeeRepo::list(pool)
        .await?
        .into_iter()
        .map(|e| (e.id, e.manager_id))
        .collect();

    let mut report = ImportReport::new(rows.len());
    for row in rows {
        match import_row(pool, &existing, row.draft).await {
            Ok(()) => report.record_inserted(),
            Err(err) => report.record_failure(row.row_number, row_error_message(&err)),
        }
    }

    tracing::info!(
        account_id = actor.account_id,
        total = report.total,
        inserted = report.inserted,
        failed = report.failed,
        "Employee import finished"
    );
    Ok(report)
}

async fn import_row(
    pool: &DbPool,
    existing: &ManagerMap,
    draft: EmployeeDraft,
) -> AppResult<()> {
    let draft = draft.normalized()?;
    validate_new_manager(draft.manager_id.as_deref(), existing)?;
    insert_employee(pool, draft, Some(ACTOR_IMPORT.to_string())).await?;
    Ok(())
}

/// Human-readable message for a failed row. Store internals are not exposed.
fn row_error_message(err: &AppError) -> String {
    match err.as_core() {
        Some(core) => core.to_string(),
        None => {
            tracing::error!(error = %err, "Unexpected error importing row");
            "Unexpected error while creating employee".to_string()
        }
    }
}
