/// Domain-level error kinds.
///
/// Every failure the directory can report is one of these variants. They are
/// constructed where the condition is detected; callers branch on the
/// variant, never on the message text.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Employee {employee_id} cannot be their own manager")]
    SelfManagement { employee_id: String },

    #[error("Manager {manager_id} does not reference an existing employee")]
    UnknownManager { manager_id: String },

    #[error("Assigning manager {manager_id} to employee {employee_id} would create a reporting cycle")]
    Cycle {
        employee_id: String,
        manager_id: String,
    },

    #[error("An employee with contact email '{email}' already exists")]
    DuplicateEmail { email: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Concurrent modification: {0}")]
    ConcurrentModification(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::Validation(_) => "VALIDATION_ERROR",
            CoreError::SelfManagement { .. } => "SELF_MANAGEMENT",
            CoreError::UnknownManager { .. } => "UNKNOWN_MANAGER",
            CoreError::Cycle { .. } => "CYCLE",
            CoreError::DuplicateEmail { .. } => "DUPLICATE_EMAIL",
            CoreError::Conflict(_) => "CONFLICT",
            CoreError::ConcurrentModification(_) => "CONCURRENT_MODIFICATION",
            CoreError::Unauthorized(_) => "UNAUTHORIZED",
            CoreError::Forbidden(_) => "FORBIDDEN",
            CoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {detail}")
            })
            .collect();
        fields.sort();
        CoreError::Validation(fields.join("; "))
    }
}
