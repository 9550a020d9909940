//! Query-string parameters shared by the directory handlers.

use serde::Deserialize;

use crate::error::AppError;

/// `?limit=&offset=`. Clamping happens where the query is built.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?format=` on the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
    Pdf,
}

impl ExportParams {
    /// XLSX when absent or blank.
    pub fn resolve(&self) -> Result<ExportFormat, AppError> {
        let Some(raw) = self.format.as_deref() else {
            return Ok(ExportFormat::Xlsx);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(AppError::BadRequest("Unsupported format".into())),
        }
    }
}
