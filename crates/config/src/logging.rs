//! Logging configuration

use serde::Deserialize;

/// Logging configuration
///
/// The level string is an `EnvFilter` directive, so both plain levels
/// ("info") and per-target filters ("info,hydrant_pipeline=debug") work.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level / filter directive. Default: "info"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}
