//! Service configuration.
//!
//! Configuration is loaded from environment variables. The database URL is
//! redacted in Debug output.

use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default number of rows returned by a report.
pub const DEFAULT_REPORT_LIMIT: i64 = 50;

/// Hard cap on rows returned by a report.
pub const MAX_REPORT_LIMIT: i64 = 200;

/// Service configuration.
///
/// Loaded from environment variables with sensible defaults. The database
/// URL and the admin token are redacted in Debug output.
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Server bind address (default: "0.0.0.0:8080").
    pub bind_address: String,

    /// Bearer token required on mutating endpoints.
    pub admin_token: String,

    /// Default report row limit when the request does not specify one.
    pub report_limit: i64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("bind_address", &self.bind_address)
            .field("admin_token", &"[REDACTED]")
            .field("report_limit", &self.report_limit)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid report limit configuration: {0}")]
    InvalidReportLimit(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let admin_token = vars
            .get("ADMIN_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("ADMIN_TOKEN".to_string()))?
            .clone();

        let report_limit = if let Some(value_str) = vars.get("REPORT_LIMIT") {
            let value: i64 = value_str.parse().map_err(|e| {
                ConfigError::InvalidReportLimit(format!(
                    "REPORT_LIMIT must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value <= 0 {
                return Err(ConfigError::InvalidReportLimit(format!(
                    "REPORT_LIMIT must be positive, got {}",
                    value
                )));
            }

            if value > MAX_REPORT_LIMIT {
                return Err(ConfigError::InvalidReportLimit(format!(
                    "REPORT_LIMIT must not exceed {}, got {}",
                    MAX_REPORT_LIMIT, value
                )));
            }

            value
        } else {
            DEFAULT_REPORT_LIMIT
        };

        Ok(Config {
            database_url,
            bind_address,
            admin_token,
            report_limit,
        })
    }
}
