//! Repository for the `employees` table.
//!
//! Read helpers take a pool. Everything that writes takes an open
//! transaction; callers lock the hierarchy first with
//! [`EmployeeRepo::lock_hierarchy`] so validation and the write see the
//! same manager map.

use orgdir_core::employee::{EmployeeDraft, STATUS_TERMINATED};
use orgdir_core::hierarchy::ManagerMap;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::employee::Employee;

/// Column list shared across queries.
const COLUMNS: &str = "id, name, title, department, manager_id, contact_email, \
                       contact_phone, hire_date, salary, status, created_at, updated_at";

/// Advisory lock key serializing writers of the reporting hierarchy.
pub const HIERARCHY_LOCK_KEY: i64 = 0x6f72_6764_6972;

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// List all employees ordered by name, then id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Employees included in exports: everyone not terminated.
    pub async fn list_for_export(pool: &PgPool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees WHERE status <> $1 ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(STATUS_TERMINATED)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an employee by contact email (case-insensitive).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM employees WHERE LOWER(contact_email) = LOWER($1) \
             ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Take the transaction-scoped hierarchy lock. Released on commit or rollback.
    pub async fn lock_hierarchy(tx: &mut Transaction<'_, Postgres>) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(HIERARCHY_LOCK_KEY)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Load every `id -> manager_id` edge.
    pub async fn load_manager_map(
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<ManagerMap, sqlx::Error> {
        let rows: Vec<(String, Option<String>)> =
            sqlx::query_as("SELECT id, manager_id FROM employees")
                .fetch_all(&mut **tx)
                .await?;
        Ok(rows.into_iter().collect())
    }

    /// Read a row inside the transaction, locking it against other writers.
    pub async fn find_for_update(
        tx: &mut Transaction<'_, Postgres>,
        id: &str,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Whether another employee already uses `email`.
    pub async fn email_in_use(
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
        exclude_id: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees \
             WHERE contact_email = $1 AND ($2::TEXT IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// Insert a new employee with a caller-generated id, returning the row.
    pub async fn insert(
        tx: &mut Transaction<'_, Postgres>,
        id: &str,
        draft: &EmployeeDraft,
    ) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "INSERT INTO employees
                (id, name, title, department, manager_id, contact_email,
                 contact_phone, hire_date, salary, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.title)
            .bind(&draft.department)
            .bind(&draft.manager_id)
            .bind(&draft.contact_email)
            .bind(&draft.contact_phone)
            .bind(draft.hire_date)
            .bind(draft.salary)
            .bind(draft.status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Overwrite every writable column. Returns `None` if the row is gone.
    pub async fn update(
        tx: &mut Transaction<'_, Postgres>,
        id: &str,
        draft: &EmployeeDraft,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "UPDATE employees SET
                name = $2,
                title = $3,
                department = $4,
                manager_id = $5,
                contact_email = $6,
                contact_phone = $7,
                hire_date = $8,
                salary = $9,
                status = $10
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.title)
            .bind(&draft.department)
            .bind(&draft.manager_id)
            .bind(&draft.contact_email)
            .bind(&draft.contact_phone)
            .bind(draft.hire_date)
            .bind(draft.salary)
            .bind(draft.status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Delete an employee. Direct reports become roots via `ON DELETE SET NULL`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(tx: &mut Transaction<'_, Postgres>, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
