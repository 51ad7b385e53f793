//! Configuration error types

use std::io;
use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("failed to read config file '{path}': {source}")]
    Io {
        /// Path to the file
        path: String,
        /// Underlying IO error
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error - a value is out of range
    #[error("{section}.{field} is invalid: {reason}")]
    InvalidValue {
        /// Config section (e.g. "window")
        section: &'static str,
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },

    /// Validation error - required field missing
    #[error("stream '{stream}' is missing required field '{field}'")]
    MissingField {
        /// Stream name
        stream: &'static str,
        /// Missing field name
        field: &'static str,
    },
}

impl ConfigError {
    /// Shorthand for an `InvalidValue` error
    pub fn invalid(section: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            section,
            field,
            reason: reason.into(),
        }
    }
}
