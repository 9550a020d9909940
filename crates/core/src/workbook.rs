//! Spreadsheet workbooks (XLSX, XLS, ODS) as rows of text cells.
//!
//! Reading flattens the first worksheet into the same `Vec<Vec<String>>`
//! shape [`crate::tabular::parse_csv`] produces, so import does not care
//! which format was uploaded. Writing emits a single-sheet XLSX file.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::CoreError;

/// Zip local-file header (XLSX, ODS).
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE compound document header (legacy XLS).
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// One exported cell. Numbers stay numeric in the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetCell {
    Text(String),
    Number(f64),
}

impl SheetCell {
    /// Plain-text rendering, used for CSV output.
    pub fn to_text(&self) -> String {
        match self {
            SheetCell::Text(s) => s.clone(),
            SheetCell::Number(n) => number_text(*n),
        }
    }
}

impl From<String> for SheetCell {
    fn from(value: String) -> Self {
        SheetCell::Text(value)
    }
}

impl From<&str> for SheetCell {
    fn from(value: &str) -> Self {
        SheetCell::Text(value.to_string())
    }
}

/// Whether `bytes` look like a binary workbook rather than CSV text.
pub fn is_workbook(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC)
}

/// Read the first worksheet of a workbook into text rows.
///
/// Whole-number floats lose their `.0`, dates become `YYYY-MM-DD` and
/// empty or error cells become empty strings.
pub fn read_workbook(bytes: &[u8]) -> Result<Vec<Vec<String>>, CoreError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| CoreError::Validation(format!("Unreadable spreadsheet: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CoreError::Validation("No sheets found".into()))?
        .map_err(|e| CoreError::Validation(format!("Unreadable spreadsheet: {e}")))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => number_text(*f),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.date().format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        Data::Error(_) | Data::Empty => String::new(),
    }
}

/// `125000.0` reads as `125000`; fractional values keep their digits.
fn number_text(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Write `header` (bold) and `rows` into a one-sheet XLSX file.
pub fn write_workbook(
    sheet_name: &str,
    header: &[&str],
    rows: &[Vec<SheetCell>],
) -> Result<Vec<u8>, CoreError> {
    let xlsx_err = |e: rust_xlsxwriter::XlsxError| CoreError::Internal(format!("XLSX encoding failed: {e}"));

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).map_err(xlsx_err)?;

    for (col, title) in header.iter().enumerate() {
        let col = col as u16;
        sheet
            .write_string_with_format(0, col, *title, &bold)
            .map_err(xlsx_err)?;
        sheet.set_column_width(col, 18).map_err(xlsx_err)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                SheetCell::Text(s) => sheet.write_string(r, col, s.as_str()),
                SheetCell::Number(n) => sheet.write_number(r, col, *n),
            }
            .map_err(xlsx_err)?;
        }
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}
