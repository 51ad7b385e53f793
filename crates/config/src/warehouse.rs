//! Warehouse connection configuration

use crate::{ConfigError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Default warehouse request timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default error table name
pub const DEFAULT_ERROR_TABLE: &str = "ingest_errors";

/// Which warehouse client implementation to run against
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseMode {
    /// HTTP insert-all client (default)
    #[default]
    Http,
    /// In-process memory warehouse, for local runs and smoke tests
    Memory,
}

/// Warehouse connection configuration
///
/// Authentication is an external concern: when `auth_token_env` is set,
/// the named environment variable is read at startup and sent as a bearer
/// token. Token refresh belongs to whatever provisions that variable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WarehouseConfig {
    /// Client implementation. Default: http
    pub mode: WarehouseMode,

    /// Base URL of the warehouse write API
    pub base_url: String,

    /// Table receiving error records. Default: "ingest_errors"
    pub error_table: String,

    /// Environment variable holding the bearer token, if any
    pub auth_token_env: Option<String>,

    /// Per-request timeout. Default: 30s
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            mode: WarehouseMode::Http,
            base_url: "http://localhost:8980".into(),
            error_table: DEFAULT_ERROR_TABLE.into(),
            auth_token_env: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl WarehouseConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.mode == WarehouseMode::Http && self.base_url.is_empty() {
            return Err(ConfigError::invalid("warehouse", "base_url", "must not be empty"));
        }
        if self.error_table.is_empty() {
            return Err(ConfigError::invalid("warehouse", "error_table", "must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WarehouseConfig::default();
        assert_eq!(config.mode, WarehouseMode::Http);
        assert_eq!(config.error_table, "ingest_errors");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_memory_mode_allows_empty_url() {
        let config: WarehouseConfig =
            toml::from_str("mode = \"memory\"\nbase_url = \"\"").unwrap();
        assert!(config.validate().is_ok());
    }
}
