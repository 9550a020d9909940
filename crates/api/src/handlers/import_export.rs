//! Spreadsheet import and export for the directory.
//!
//! Export renders XLSX (the default), CSV, PDF or JSON. Import takes an
//! uploaded workbook or CSV file, or a sheet the client already decoded.

use axum::extract::{FromRequest, Multipart, Query, Request, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orgdir_core::error::CoreError;
use orgdir_core::import::{json_cell_text, ImportReport, EXPORT_HEADERS};
use orgdir_core::pdf_report::{render_table, PdfColumn};
use orgdir_core::tabular::{parse_csv, write_csv};
use orgdir_core::workbook::{is_workbook, read_workbook, write_workbook, SheetCell};
use orgdir_db::models::employee::Employee;
use orgdir_db::repositories::EmployeeRepo;
use serde::Deserialize;

use crate::directory::reconciler;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::query::{ExportFormat, ExportParams};
use crate::response::DataResponse;
use crate::state::AppState;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Columns of the printable export.
const PDF_COLUMNS: &[PdfColumn<'static>] = &[
    PdfColumn { heading: "Name", width: 28.0 },
    PdfColumn { heading: "Email", width: 46.0 },
    PdfColumn { heading: "Title", width: 38.0 },
    PdfColumn { heading: "Department", width: 35.0 },
    PdfColumn { heading: "Status", width: 31.0 },
];

/// JSON import body: a sheet already decoded into rows of cells.
///
/// Cells may be strings, numbers, booleans or null.
#[derive(Debug, Deserialize)]
pub struct ImportRowsRequest {
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl ImportRowsRequest {
    pub fn into_sheet(self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(json_cell_text).collect())
            .collect()
    }
}

/// GET /api/v1/employees/export?format=xlsx|csv|pdf|json
///
/// Terminated employees are left out.
pub async fn export(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<ExportParams>,
) -> AppResult<Response> {
    let format = params.resolve()?;

    let employees = EmployeeRepo::list_for_export(&state.pool).await?;
    tracing::debug!(count = employees.len(), ?format, "Exporting employees");

    let (content_type, filename, body) = match format {
        ExportFormat::Json => return Ok(Json(DataResponse { data: employees }).into_response()),
        ExportFormat::Xlsx => {
            let rows: Vec<Vec<SheetCell>> = employees.iter().map(export_row).collect();
            let bytes = write_workbook("Employees", EXPORT_HEADERS, &rows)?;
            (XLSX_CONTENT_TYPE, "employees.xlsx", bytes)
        }
        ExportFormat::Csv => {
            let rows: Vec<Vec<String>> = employees
                .iter()
                .map(|e| export_row(e).iter().map(SheetCell::to_text).collect())
                .collect();
            let text = write_csv(EXPORT_HEADERS, &rows);
            ("text/csv; charset=utf-8", "employees.csv", text.into_bytes())
        }
        ExportFormat::Pdf => {
            let rows: Vec<Vec<String>> = employees.iter().map(pdf_row).collect();
            let bytes = render_table("Employees Export", PDF_COLUMNS, &rows)?;
            ("application/pdf", "employees.pdf", bytes)
        }
    };

    let disposition = format!("attachment; filename=\"{filename}\"");
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, content_type.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

fn export_row(e: &Employee) -> Vec<SheetCell> {
    vec![
        e.id.as_str().into(),
        e.name.as_str().into(),
        e.title.as_str().into(),
        e.department.as_str().into(),
        e.manager_id.as_deref().unwrap_or_default().into(),
        e.contact_email.as_str().into(),
        e.contact_phone.as_deref().unwrap_or_default().into(),
        e.hire_date.format("%Y-%m-%d").to_string().into(),
        SheetCell::Number(e.salary as f64),
        e.status.as_str().into(),
    ]
}

fn pdf_row(e: &Employee) -> Vec<String> {
    vec![
        e.name.clone(),
        e.contact_email.clone(),
        e.title.clone(),
        e.department.clone(),
        e.status.as_str().to_string(),
    ]
}

/// POST /api/v1/employees/import
///
/// Accepts `multipart/form-data` with a `file` field holding an XLSX, XLS,
/// ODS or CSV file, or a JSON body `{"rows": [[...], ...]}`.
pub async fn import(
    State(state): State<AppState>,
    RequireStaff(user): RequireStaff,
    request: Request,
) -> AppResult<Json<ImportReport>> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    let sheet = if is_multipart {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        read_upload(multipart).await?
    } else {
        let Json(body) = Json::<ImportRowsRequest>::from_request(request, &state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        body.into_sheet()
    };

    let report = reconciler::import_sheet(&state.pool, &user.actor, &sheet).await?;
    Ok(Json(report))
}

async fn read_upload(mut multipart: Multipart) -> AppResult<Vec<Vec<String>>> {
    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some(data.to_vec());
        }
    }

    let data = file_data.ok_or_else(|| AppError::BadRequest("Missing file".into()))?;
    if is_workbook(&data) {
        return Ok(read_workbook(&data)?);
    }
    let text = String::from_utf8(data).map_err(|_| {
        CoreError::Validation("Uploaded file must be a spreadsheet or UTF-8 CSV text".into())
    })?;
    Ok(parse_csv(&text))
}
