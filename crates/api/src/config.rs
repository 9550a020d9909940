//! Process configuration read once at startup.
//!
//! Malformed values panic with the offending variable name; absent values
//! fall back to local-development defaults.

use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

/// Default cap on an import upload (multipart file or JSON body).
pub const DEFAULT_MAX_IMPORT_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API with credentials.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long shutdown waits for in-flight requests and the pool to drain.
    pub shutdown_timeout_secs: u64,
    /// Largest request body accepted, sized for spreadsheet imports.
    pub max_import_bytes: usize,
    /// Insert the demo directory on startup when no employees exist yet.
    pub seed_demo_data: bool,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Read every setting from the environment.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3000`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `MAX_IMPORT_BYTES`      | `10485760`              |
    /// | `SEED_DEMO_DATA`        | `false`                 |
    ///
    /// JWT settings come from [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 3000),
            cors_origins: split_origins(&env_or("CORS_ORIGINS", "http://localhost:5173")),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: parse_env("SHUTDOWN_TIMEOUT_SECS", 30),
            max_import_bytes: parse_env("MAX_IMPORT_BYTES", DEFAULT_MAX_IMPORT_BYTES),
            seed_demo_data: std::env::var("SEED_DEMO_DATA")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
            jwt: JwtConfig::from_env(),
        }
    }

    /// `host:port` for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} is not valid ('{raw}'): {e}")),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
