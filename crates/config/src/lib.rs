//! Hydrant - Configuration
//!
//! TOML configuration for the ingestor, one module per concern.
//!
//! # Example
//!
//! ```toml
//! [warehouse]
//! base_url = "https://warehouse.internal:8443"
//! error_table = "ingest_errors"
//!
//! [window]
//! max_count = 500
//! max_window = "10s"
//!
//! [retry]
//! max_attempts = 3
//! initial_delay = "250ms"
//!
//! [progress]
//! interval = "10s"
//! format = "human"
//!
//! [streams.sample]
//! table = "sample_posts"
//! source = "firehose/sample.jsonl"
//!
//! [streams.user]
//! table = "user_posts"
//! source = "firehose/user.jsonl"
//! ```
//!
//! Every section is optional; a missing section falls back to defaults
//! that run against a local warehouse.

mod error;
mod logging;
mod progress;
mod retry;
mod streams;
mod warehouse;
mod window;

pub use error::{ConfigError, Result};
pub use logging::LoggingConfig;
pub use progress::{ProgressConfig, ProgressFormat, StreamEndPolicy};
pub use retry::RetryConfig;
pub use streams::{StreamConfig, StreamsConfig};
pub use warehouse::{WarehouseConfig, WarehouseMode};
pub use window::WindowConfig;

use serde::Deserialize;
use std::path::Path;

/// Root configuration for the ingestor
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging setup
    pub logging: LoggingConfig,

    /// Warehouse connection
    pub warehouse: WarehouseConfig,

    /// Windowing policy shared by both streams
    pub window: WindowConfig,

    /// Retry policy for batched inserts
    pub retry: RetryConfig,

    /// Progress reporting
    pub progress: ProgressConfig,

    /// Per-stream settings
    pub streams: StreamsConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Config = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Cross-section validation
    pub fn validate(&self) -> Result<()> {
        self.window.validate()?;
        self.retry.validate()?;
        self.streams.validate()?;
        self.warehouse.validate()?;
        Ok(())
    }
}
