/// Account primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Employee identifiers are opaque strings (UUIDv7 text for new records).
pub type EmployeeId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh employee identifier.
///
/// UUIDv7 keeps ids roughly insertion-ordered, which keeps the primary key
/// index compact.
pub fn new_employee_id() -> EmployeeId {
    uuid::Uuid::now_v7().to_string()
}
