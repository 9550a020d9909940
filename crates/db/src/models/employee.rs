//! Employee entity model and DTOs.

use chrono::NaiveDate;
use orgdir_core::employee::{deserialize_nullable, EmployeeDraft, EmployeeStatus};
use orgdir_core::forest::HierarchyNode;
use orgdir_core::types::{EmployeeId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from the `employees` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub title: String,
    pub department: String,
    pub manager_id: Option<EmployeeId>,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub hire_date: NaiveDate,
    pub salary: i64,
    #[sqlx(try_from = "String")]
    pub status: EmployeeStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Employee {
    /// JSON snapshot stored in change-log `before`/`after` payloads.
    pub fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// The writable attributes of this row.
    pub fn to_draft(&self) -> EmployeeDraft {
        EmployeeDraft {
            name: self.name.clone(),
            title: self.title.clone(),
            department: self.department.clone(),
            manager_id: self.manager_id.clone(),
            contact_email: self.contact_email.clone(),
            contact_phone: self.contact_phone.clone(),
            hire_date: self.hire_date,
            salary: self.salary,
            status: self.status,
        }
    }
}

impl HierarchyNode for Employee {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn manager_ref(&self) -> Option<&str> {
        self.manager_id.as_deref()
    }
}

/// Compact employee view used in org-chart nodes.
#[derive(Debug, Clone, Serialize)]
pub struct OrgChartEntry {
    pub id: EmployeeId,
    pub name: String,
    pub title: String,
    pub department: String,
    pub manager_id: Option<EmployeeId>,
    pub status: EmployeeStatus,
}

impl From<&Employee> for OrgChartEntry {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            title: e.title.clone(),
            department: e.department.clone(),
            manager_id: e.manager_id.clone(),
            status: e.status,
        }
    }
}

impl HierarchyNode for OrgChartEntry {
    fn node_id(&self) -> &str {
        &self.id
    }

    fn manager_ref(&self) -> Option<&str> {
        self.manager_id.as_deref()
    }
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub title: String,
    pub department: String,
    #[serde(default)]
    pub manager_id: Option<EmployeeId>,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    pub hire_date: NaiveDate,
    pub salary: i64,
    #[serde(default = "default_status")]
    pub status: EmployeeStatus,
}

fn default_status() -> EmployeeStatus {
    EmployeeStatus::Active
}

impl From<CreateEmployee> for EmployeeDraft {
    fn from(input: CreateEmployee) -> Self {
        EmployeeDraft {
            name: input.name,
            title: input.title,
            department: input.department,
            manager_id: input.manager_id,
            contact_email: input.contact_email,
            contact_phone: input.contact_phone,
            hire_date: input.hire_date,
            salary: input.salary,
            status: input.status,
        }
    }
}

/// DTO for updating an existing employee. All fields are optional.
///
/// `manager_id` and `contact_phone` distinguish an absent key (keep the
/// current value) from an explicit `null` (clear it).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub title: Option<String>,
    pub department: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub manager_id: Option<Option<EmployeeId>>,
    pub contact_email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub contact_phone: Option<Option<String>>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<i64>,
    pub status: Option<EmployeeStatus>,
}

impl UpdateEmployee {
    /// Overlay the supplied fields on `current`.
    pub fn apply_to(&self, current: &Employee) -> EmployeeDraft {
        let mut draft = current.to_draft();
        if let Some(name) = &self.name {
            draft.name = name.clone();
        }
        if let Some(title) = &self.title {
            draft.title = title.clone();
        }
        if let Some(department) = &self.department {
            draft.department = department.clone();
        }
        if let Some(manager_id) = &self.manager_id {
            draft.manager_id = manager_id.clone();
        }
        if let Some(email) = &self.contact_email {
            draft.contact_email = email.clone();
        }
        if let Some(phone) = &self.contact_phone {
            draft.contact_phone = phone.clone();
        }
        if let Some(hire_date) = self.hire_date {
            draft.hire_date = hire_date;
        }
        if let Some(salary) = self.salary {
            draft.salary = salary;
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        draft
    }
}
