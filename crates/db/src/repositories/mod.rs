//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` or an open transaction as the first argument.

pub mod account_repo;
pub mod change_log_repo;
pub mod employee_repo;

pub use account_repo::AccountRepo;
pub use change_log_repo::ChangeLogRepo;
pub use employee_repo::EmployeeRepo;
