//! Per-stream configuration
//!
//! Exactly two streams exist: `sample` and `user`. Each has its own
//! destination table and its own replay source; everything else (window,
//! retry, warehouse) is shared.

use crate::{ConfigError, Result};
use serde::Deserialize;

/// Settings for both named streams
///
/// Omitting the whole `[streams]` block targets the conventional
/// `sample_posts` / `user_posts` tables. A partially written stream
/// section must name its table explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamsConfig {
    /// The public sample firehose
    #[serde(default = "default_sample")]
    pub sample: StreamConfig,

    /// The followed-accounts firehose
    #[serde(default = "default_user")]
    pub user: StreamConfig,
}

impl Default for StreamsConfig {
    fn default() -> Self {
        Self {
            sample: default_sample(),
            user: default_user(),
        }
    }
}

impl StreamsConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        self.sample.validate("sample")?;
        self.user.validate("user")?;
        Ok(())
    }
}

fn default_sample() -> StreamConfig {
    StreamConfig {
        table: "sample_posts".into(),
        source: "-".into(),
    }
}

fn default_user() -> StreamConfig {
    StreamConfig {
        table: "user_posts".into(),
        source: "-".into(),
    }
}

/// Settings for one stream
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Destination table for committed posts
    pub table: String,

    /// JSONL source path; "-" reads stdin
    pub source: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            table: String::new(),
            source: "-".into(),
        }
    }
}

impl StreamConfig {
    fn validate(&self, stream: &'static str) -> Result<()> {
        if self.table.is_empty() {
            return Err(ConfigError::MissingField {
                stream,
                field: "table",
            });
        }
        Ok(())
    }
}
