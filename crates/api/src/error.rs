use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use orgdir_core::error::CoreError;
use serde_json::json;

/// Unique constraint on `employees.contact_email`.
pub const UQ_EMPLOYEE_EMAIL: &str = "uq_employees_contact_email";
/// Self-referencing foreign key `employees.manager_id -> employees.id`.
pub const FK_EMPLOYEE_MANAGER: &str = "fk_employees_manager";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `orgdir_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// The domain kind behind this error, if it has one.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            AppError::Core(core) => Some(core),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    let status = match core {
        CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        CoreError::SelfManagement { .. }
        | CoreError::UnknownManager { .. }
        | CoreError::Cycle { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::DuplicateEmail { .. }
        | CoreError::Conflict(_)
        | CoreError::ConcurrentModification(_) => StatusCode::CONFLICT,
        CoreError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        CoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            return internal();
        }
    };

    let message = match core {
        CoreError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
        CoreError::Validation(msg)
        | CoreError::Conflict(msg)
        | CoreError::ConcurrentModification(msg)
        | CoreError::Unauthorized(msg)
        | CoreError::Forbidden(msg) => msg.clone(),
        other => other.to_string(),
    };

    (status, core.code(), message)
}

/// Map store-level constraint violations onto domain kinds.
///
/// Classification uses the SQLSTATE and the constraint name only. Returns
/// `None` for errors with no domain meaning.
pub fn domain_error_from_sqlx(
    err: &sqlx::Error,
    email: Option<&str>,
    manager_id: Option<&str>,
) -> Option<CoreError> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let code = db_err.code();
    let constraint = db_err.constraint().unwrap_or_default();
    match (code.as_deref(), constraint) {
        (Some("23505"), UQ_EMPLOYEE_EMAIL) => Some(CoreError::DuplicateEmail {
            email: email.unwrap_or_default().to_string(),
        }),
        (Some("23503"), FK_EMPLOYEE_MANAGER) => Some(CoreError::UnknownManager {
            manager_id: manager_id.unwrap_or_default().to_string(),
        }),
        // serialization_failure, deadlock_detected
        (Some("40001"), _) | (Some("40P01"), _) => Some(CoreError::ConcurrentModification(
            "The directory changed while this request was running; retry it".to_string(),
        )),
        _ => None,
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Known employee constraints map to their domain codes.
/// - Other unique violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let Some(core) = domain_error_from_sqlx(err, None, None) {
        let (status, code, _) = classify_core_error(&core);
        let message = match core {
            CoreError::DuplicateEmail { .. } => {
                "An employee with this contact email already exists".to_string()
            }
            CoreError::UnknownManager { .. } => {
                "Manager does not reference an existing employee".to_string()
            }
            other => other.to_string(),
        };
        return (status, code, message);
    }

    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    internal()
}
