//! Windowing configuration
//!
//! Bounds every batch by item count and wall time. Memory per stream is
//! bounded by `max_count` buffered posts plus one in-flight batch.

use crate::{ConfigError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Default item count that closes a window
pub const DEFAULT_MAX_COUNT: usize = 500;

/// Default wall-time bound, measured from the first item of the window
pub const DEFAULT_MAX_WINDOW: Duration = Duration::from_secs(10);

/// Windowing policy shared by both streams
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Items that close a window. Default: 500
    pub max_count: usize,

    /// Elapsed time since the window's first item that closes it.
    /// Default: 10s
    #[serde(with = "humantime_serde")]
    pub max_window: Duration,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            max_window: DEFAULT_MAX_WINDOW,
        }
    }
}

impl WindowConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_count == 0 {
            return Err(ConfigError::invalid("window", "max_count", "must be >= 1"));
        }
        if self.max_window.is_zero() {
            return Err(ConfigError::invalid("window", "max_window", "must be > 0"));
        }
        Ok(())
    }
}
