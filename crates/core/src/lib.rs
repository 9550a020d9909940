//! Pure domain logic for the employee directory.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers call
//! into it to validate edits, derive the reporting forest, shape the
//! change-log payloads they persist, and encode or decode sheets.

pub mod audit;
pub mod employee;
pub mod error;
pub mod forest;
pub mod hierarchy;
pub mod import;
pub mod pdf_report;
pub mod roles;
pub mod tabular;
pub mod types;
pub mod workbook;
