//! Demo directory used by local development and tests.

use chrono::NaiveDate;
use orgdir_core::audit::Change;
use orgdir_core::employee::{EmployeeDraft, EmployeeStatus};
use orgdir_core::types::new_employee_id;

use crate::models::change_log::CreateChangeLog;
use crate::models::employee::Employee;
use crate::repositories::{ChangeLogRepo, EmployeeRepo};
use crate::DbPool;

struct SeedEmployee {
    name: &'static str,
    title: &'static str,
    department: &'static str,
    /// Index into the already-seeded rows.
    manager: Option<usize>,
    email: &'static str,
    phone: &'static str,
    hire_date: (i32, u32, u32),
    salary: i64,
    status: EmployeeStatus,
}

const DEMO: &[SeedEmployee] = &[
    SeedEmployee {
        name: "Avery Walker",
        title: "CEO",
        department: "Executive",
        manager: None,
        email: "avery.walker@example.com",
        phone: "555-111-2222",
        hire_date: (2020, 1, 15),
        salary: 250_000,
        status: EmployeeStatus::Active,
    },
    SeedEmployee {
        name: "Jordan Kim",
        title: "VP of Engineering",
        department: "Engineering",
        manager: Some(0),
        email: "jordan.kim@example.com",
        phone: "555-222-3333",
        hire_date: (2021, 3, 8),
        salary: 190_000,
        status: EmployeeStatus::Leave,
    },
    SeedEmployee {
        name: "Riley Patel",
        title: "Engineering Manager",
        department: "Engineering",
        manager: Some(1),
        email: "riley.patel@example.com",
        phone: "555-333-4444",
        hire_date: (2022, 7, 21),
        salary: 155_000,
        status: EmployeeStatus::Terminated,
    },
    SeedEmployee {
        name: "Casey Rivera",
        title: "Software Engineer",
        department: "Engineering",
        manager: Some(2),
        email: "casey.rivera@example.com",
        phone: "555-444-5555",
        hire_date: (2023, 2, 10),
        salary: 125_000,
        status: EmployeeStatus::Active,
    },
    SeedEmployee {
        name: "Morgan Blake",
        title: "HR Generalist",
        department: "People Ops",
        manager: Some(0),
        email: "morgan.blake@example.com",
        phone: "555-555-6666",
        hire_date: (2021, 11, 5),
        salary: 90_000,
        status: EmployeeStatus::Active,
    },
];

/// Insert the five-person demo hierarchy if the directory is empty.
///
/// Returns the inserted rows in seed order (CEO first), or an empty vec when
/// employees already exist. Each insert is recorded in the change log with no
/// actor.
pub async fn seed_demo_directory(pool: &DbPool) -> Result<Vec<Employee>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    EmployeeRepo::lock_hierarchy(&mut tx).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM employees")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        tracing::debug!(existing, "Directory not empty, skipping demo seed");
        return Ok(Vec::new());
    }

    let mut seeded: Vec<Employee> = Vec::with_capacity(DEMO.len());
    for entry in DEMO {
        let (y, m, d) = entry.hire_date;
        let hire_date = NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| sqlx::Error::Protocol(format!("bad seed date for {}", entry.name)))?;
        let draft = EmployeeDraft {
            name: entry.name.to_string(),
            title: entry.title.to_string(),
            department: entry.department.to_string(),
            manager_id: entry.manager.map(|idx| seeded[idx].id.clone()),
            contact_email: entry.email.to_string(),
            contact_phone: Some(entry.phone.to_string()),
            hire_date,
            salary: entry.salary,
            status: entry.status,
        };

        let employee = EmployeeRepo::insert(&mut tx, &new_employee_id(), &draft).await?;
        let after = employee
            .snapshot()
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let log = CreateChangeLog::for_employee(&employee.id, Change::Create { after }, None)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        ChangeLogRepo::insert(&mut tx, &log).await?;
        seeded.push(employee);
    }

    tx.commit().await?;
    tracing::info!(count = seeded.len(), "Seeded demo directory");
    Ok(seeded)
}
