//! Common types for sources

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Errors from source adapters
#[derive(Debug, Error)]
pub enum SourceError {
    /// Underlying reader failed
    #[error("source I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Metrics shared by all source types
#[derive(Debug, Default)]
pub struct SourceMetrics {
    /// Posts successfully parsed and handed to the pipeline
    pub posts_read: AtomicU64,

    /// Lines skipped because they failed to parse
    pub malformed_lines: AtomicU64,
}

impl SourceMetrics {
    /// Create new metrics with all counters at zero
    pub const fn new() -> Self {
        Self {
            posts_read: AtomicU64::new(0),
            malformed_lines: AtomicU64::new(0),
        }
    }

    /// Record a parsed post
    #[inline]
    pub fn record_post(&self) {
        self.posts_read.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a skipped line
    #[inline]
    pub fn record_malformed(&self) {
        self.malformed_lines.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a snapshot of current values
    pub fn snapshot(&self) -> SourceMetricsSnapshot {
        SourceMetricsSnapshot {
            posts_read: self.posts_read.load(Ordering::Relaxed),
            malformed_lines: self.malformed_lines.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of source metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceMetricsSnapshot {
    pub posts_read: u64,
    pub malformed_lines: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_counters() {
        let metrics = SourceMetrics::new();
        metrics.record_post();
        metrics.record_post();
        metrics.record_malformed();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.posts_read, 2);
        assert_eq!(snapshot.malformed_lines, 1);
    }
}
