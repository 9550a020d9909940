//! Row parsing and result accounting for batch employee import.
//!
//! A sheet arrives as rows of text cells with a header row first. Rows that
//! fail basic shape checks (missing required cell, unparseable date or
//! salary, unknown status) are skipped without being counted as failures.
//! Shape-valid rows are then applied one by one; each failure is recorded
//! against the row's 1-based line number.

use serde::Serialize;

use crate::employee::{parse_hire_date, EmployeeDraft, EmployeeStatus};
use crate::error::CoreError;

/// Maximum number of per-row errors returned to the caller.
pub const MAX_REPORTED_ERRORS: usize = 50;

/// Headers that must be present (case-insensitive).
pub const REQUIRED_HEADERS: &[&str] = &[
    "name",
    "title",
    "department",
    "contact_email",
    "hire_date",
    "salary",
    "status",
];

/// Export/import column order. `id` is ignored on import.
pub const EXPORT_HEADERS: &[&str] = &[
    "id",
    "name",
    "title",
    "department",
    "manager_id",
    "contact_email",
    "contact_phone",
    "hire_date",
    "salary",
    "status",
];

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportColumns {
    name: usize,
    title: usize,
    department: usize,
    manager_id: Option<usize>,
    contact_email: usize,
    contact_phone: Option<usize>,
    hire_date: usize,
    salary: usize,
    status: usize,
}

impl ImportColumns {
    pub fn from_header(header: &[String]) -> Result<Self, CoreError> {
        let normalized: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| normalized.iter().position(|h| h == name);

        let missing: Vec<&str> = REQUIRED_HEADERS
            .iter()
            .copied()
            .filter(|h| find(*h).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::Validation(format!(
                "Missing required headers: {}. Required: {}",
                missing.join(","),
                REQUIRED_HEADERS.join(",")
            )));
        }

        // The required lookups cannot fail after the check above.
        let required = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            name: required("name"),
            title: required("title"),
            department: required("department"),
            manager_id: find("manager_id"),
            contact_email: required("contact_email"),
            contact_phone: find("contact_phone"),
            hire_date: required("hire_date"),
            salary: required("salary"),
            status: required("status"),
        })
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Text form of a JSON-decoded sheet cell.
///
/// Clients that decode a workbook themselves send numbers, booleans and
/// nulls as-is; they must read the same as their spreadsheet text.
pub fn json_cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A shape-valid row ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    /// 1-based line number in the source sheet (the header is line 1).
    pub row_number: usize,
    pub draft: EmployeeDraft,
}

/// Parse a whole sheet: header first, then data rows.
///
/// Fails only for sheet-level problems (empty sheet, missing headers, no
/// usable rows); individual bad rows are dropped.
pub fn parse_sheet(rows: &[Vec<String>]) -> Result<Vec<ImportRow>, CoreError> {
    let Some((header, data)) = rows.split_first() else {
        return Err(CoreError::Validation("Empty file".into()));
    };
    let columns = ImportColumns::from_header(header)?;

    let parsed: Vec<ImportRow> = data
        .iter()
        .enumerate()
        .filter_map(|(idx, cells)| parse_row(cells, &columns, idx + 2))
        .collect();

    if parsed.is_empty() {
        return Err(CoreError::Validation("No valid rows found".into()));
    }
    Ok(parsed)
}

/// Parse one data row, or `None` if it fails the shape checks.
pub fn parse_row(cells: &[String], columns: &ImportColumns, row_number: usize) -> Option<ImportRow> {
    let cell = |idx: usize| cells.get(idx).map(|c| c.trim()).unwrap_or("");
    let optional = |idx: Option<usize>| {
        idx.map(cell)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let name = cell(columns.name);
    let title = cell(columns.title);
    let department = cell(columns.department);
    let contact_email = cell(columns.contact_email);
    let hire_date = cell(columns.hire_date);
    let salary = cell(columns.salary);
    let status = cell(columns.status);

    if [name, title, department, contact_email, hire_date, salary, status]
        .iter()
        .any(|v| v.is_empty())
    {
        return None;
    }

    let hire_date = parse_hire_date(hire_date)?;
    let salary = parse_salary(salary)?;
    let status = EmployeeStatus::parse(status)?;

    Some(ImportRow {
        row_number,
        draft: EmployeeDraft {
            name: name.to_string(),
            title: title.to_string(),
            department: department.to_string(),
            manager_id: optional(columns.manager_id),
            contact_email: contact_email.to_string(),
            contact_phone: optional(columns.contact_phone),
            hire_date,
            salary,
            status,
        },
    })
}

/// Parse a salary cell, rounding decimals to the nearest whole unit.
fn parse_salary(value: &str) -> Option<i64> {
    let number: f64 = value.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    let rounded = number.round();
    if rounded < 0.0 || rounded > i64::MAX as f64 {
        return None;
    }
    Some(rounded as i64)
}

// ---------------------------------------------------------------------------
// Result accounting
// ---------------------------------------------------------------------------

/// A failure attached to a single source row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    pub row: usize,
    pub message: String,
}

/// Outcome of a batch import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub failed: usize,
    /// Number of shape-valid rows attempted.
    pub total: usize,
    /// The first [`MAX_REPORTED_ERRORS`] failures in row order.
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record_inserted(&mut self) {
        self.inserted += 1;
    }

    pub fn record_failure(&mut self, row: usize, message: impl Into<String>) {
        self.failed += 1;
        if self.errors.len() < MAX_REPORTED_ERRORS {
            self.errors.push(ImportRowError {
                row,
                message: message.into(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn header() -> Vec<String> {
        row(&[
            "ID", "Name", "Title", "Department", "Manager_ID", "Contact_Email",
            "Contact_Phone", "Hire_Date", "Salary", "Status",
        ])
    }

    fn valid(email: &str) -> Vec<String> {
        row(&[
            "ignored", "Casey Rivera", "Engineer", "Engineering", "", email, "",
            "2023-02-10", "125000.4", "Active",
        ])
    }

    #[test]
    fn headers_are_case_insensitive_and_id_is_ignored() {
        let parsed = parse_sheet(&[header(), valid("casey@example.com")]).unwrap();
        assert_eq!(parsed.len(), 1);
        let r = &parsed[0];
        assert_eq!(r.row_number, 2);
        assert_eq!(r.draft.name, "Casey Rivera");
        assert_eq!(r.draft.manager_id, None);
        assert_eq!(r.draft.contact_phone, None);
        assert_eq!(r.draft.salary, 125_000);
        assert_eq!(r.draft.status, EmployeeStatus::Active);
    }

    #[test]
    fn missing_required_header_is_rejected() {
        let h = row(&["name", "title"]);
        assert_matches!(
            parse_sheet(&[h, valid("x@example.com")]),
            Err(CoreError::Validation(msg)) if msg.contains("department")
        );
    }

    #[test]
    fn empty_sheet_is_rejected() {
        assert_matches!(parse_sheet(&[]), Err(CoreError::Validation(msg)) if msg == "Empty file");
    }

    #[test]
    fn shape_invalid_rows_are_skipped_silently() {
        let mut bad_date = valid("a@example.com");
        bad_date[7] = "someday".into();
        let mut bad_salary = valid("b@example.com");
        bad_salary[8] = "lots".into();
        let mut negative_salary = valid("c@example.com");
        negative_salary[8] = "-5".into();
        let mut bad_status = valid("d@example.com");
        bad_status[9] = "retired".into();
        let mut missing_name = valid("e@example.com");
        missing_name[1] = " ".into();

        let parsed = parse_sheet(&[
            header(),
            bad_date,
            bad_salary,
            negative_salary,
            bad_status,
            missing_name,
            row(&[]),
            valid("ok@example.com"),
        ])
        .unwrap();

        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].row_number, 8);
        assert_eq!(parsed[0].draft.contact_email, "ok@example.com");
    }

    #[test]
    fn no_valid_rows_is_rejected() {
        let mut bad = valid("a@example.com");
        bad[9] = "unknown".into();
        assert_matches!(
            parse_sheet(&[header(), bad]),
            Err(CoreError::Validation(msg)) if msg == "No valid rows found"
        );
    }

    #[test]
    fn short_rows_read_missing_cells_as_blank() {
        let h = row(&["name", "title", "department", "contact_email", "hire_date", "salary", "status", "manager_id"]);
        let r = row(&["A", "B", "C", "a@example.com", "2020-01-01", "1", "leave"]);
        let parsed = parse_sheet(&[h, r]).unwrap();
        assert_eq!(parsed[0].draft.manager_id, None);
        assert_eq!(parsed[0].draft.status, EmployeeStatus::Leave);
    }

    #[test]
    fn report_caps_errors_but_counts_all() {
        let mut report = ImportReport::new(60);
        for i in 0..55 {
            report.record_failure(i + 2, "boom");
        }
        report.record_inserted();
        assert_eq!(report.failed, 55);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.errors.len(), MAX_REPORTED_ERRORS);
        assert_eq!(report.errors[0].row, 2);
    }

    #[test]
    fn json_cells_read_as_their_text() {
        use serde_json::json;
        assert_eq!(json_cell_text(&json!("Ann")), "Ann");
        assert_eq!(json_cell_text(&json!(125000)), "125000");
        assert_eq!(json_cell_text(&json!(99.5)), "99.5");
        assert_eq!(json_cell_text(&json!(true)), "true");
        assert_eq!(json_cell_text(&json!(null)), "");
    }
}
