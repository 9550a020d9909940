pub mod auth;
pub mod change_log;
pub mod employees;
pub mod import_export;
