//! Runtime configuration gathered from the environment.

use crate::constants::{
    DEFAULT_HOST, DEFAULT_PORT, DEFAULT_RATE_TOLERANCE, DEFAULT_TOTAL_TOLERANCE,
};
use crate::env_config::{env_non_empty, env_parse_with_default};
use crate::validation::ValidationThresholds;

pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_HOST: &str = "CRIMESTAT_HOST";
pub const ENV_PORT: &str = "CRIMESTAT_PORT";
pub const ENV_TOTAL_TOLERANCE: &str = "CRIMESTAT_TOTAL_TOLERANCE";
pub const ENV_RATE_TOLERANCE: &str = "CRIMESTAT_RATE_TOLERANCE";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// PostgreSQL connection string; `None` when unset
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub thresholds: ValidationThresholds,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            thresholds: ValidationThresholds::default(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            database_url: env_non_empty(ENV_DATABASE_URL),
            host: env_non_empty(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: env_parse_with_default(ENV_PORT, DEFAULT_PORT),
            thresholds: thresholds_from_env(),
        }
    }

    /// `host:port` for binding the listener.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Tolerances from the environment; negative or non-finite values fall back to defaults.
#[must_use]
pub fn thresholds_from_env() -> ValidationThresholds {
    let sane = |v: f64, default: f64| if v.is_finite() && v >= 0.0 { v } else { default };
    ValidationThresholds {
        total_tolerance: sane(
            env_parse_with_default(ENV_TOTAL_TOLERANCE, DEFAULT_TOTAL_TOLERANCE),
            DEFAULT_TOTAL_TOLERANCE,
        ),
        rate_tolerance: sane(
            env_parse_with_default(ENV_RATE_TOLERANCE, DEFAULT_RATE_TOLERANCE),
            DEFAULT_RATE_TOLERANCE,
        ),
    }
}
