//! Employee field rules shared by single edits and batch import.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::EmployeeId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_LEAVE: &str = "leave";
pub const STATUS_TERMINATED: &str = "terminated";

/// Employment status. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Leave,
    Terminated,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Leave => STATUS_LEAVE,
            Self::Terminated => STATUS_TERMINATED,
        }
    }

    /// Parse a status name, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            STATUS_ACTIVE => Some(Self::Active),
            STATUS_LEAVE => Some(Self::Leave),
            STATUS_TERMINATED => Some(Self::Terminated),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for EmployeeStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid status '{value}'. Expected one of: active, leave, terminated"
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The full set of writable employee attributes, ready to persist.
///
/// Both create and update resolve to a draft; [`EmployeeDraft::normalized`]
/// is the single place field rules are checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EmployeeDraft {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub department: String,
    pub manager_id: Option<EmployeeId>,
    #[validate(email(message = "must be a valid email address"))]
    pub contact_email: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub contact_phone: Option<String>,
    pub hire_date: NaiveDate,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub salary: i64,
    pub status: EmployeeStatus,
}

impl EmployeeDraft {
    /// Trim text fields, turn blank optionals into `None`, then validate.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        self.name = self.name.trim().to_string();
        self.title = self.title.trim().to_string();
        self.department = self.department.trim().to_string();
        self.contact_email = self.contact_email.trim().to_string();
        self.contact_phone = blank_to_none(self.contact_phone);
        self.manager_id = blank_to_none(self.manager_id);
        self.validate()?;
        Ok(self)
    }
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse a hire date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn parse_hire_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Use with `#[serde(default, deserialize_with = "deserialize_nullable")]`:
/// an absent key stays `None`, `null` becomes `Some(None)`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
