//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated actor from a JWT Bearer token.
//! - [`rbac::RequireStaff`] -- Requires the `admin` or `hr` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated account.

pub mod auth;
pub mod rbac;
