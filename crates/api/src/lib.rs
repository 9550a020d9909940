//! Employee directory API server library.
//!
//! Exposes config, state, error handling, the directory services and routes
//! so integration tests and the binary entrypoint share them.

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
