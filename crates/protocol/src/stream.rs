//! Named stream identifiers
//!
//! Hydrant runs exactly two firehose streams side by side: the public
//! `sample` stream and the followed-accounts `user` stream. Each stream
//! owns its own pipeline; the names show up in config sections, progress
//! lines and error records.

use serde::{Deserialize, Serialize};

/// Identifier for one of the two ingestion streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamName {
    /// Public sample firehose
    Sample,
    /// Followed-accounts firehose
    User,
}

impl StreamName {
    /// Stable lowercase name used in logs and error records
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamName::Sample => "sample",
            StreamName::User => "user",
        }
    }
}

impl std::fmt::Display for StreamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
