//! Per-row insert errors
//!
//! When the warehouse rejects a batch structurally it answers with one
//! error entry per offending row. Rows that were only aborted because a
//! sibling in the same request failed come back with reason `"stopped"`;
//! those carry no information about the row itself and are filtered out
//! before anything is surfaced or recorded.

use serde::{Deserialize, Serialize};

/// Reason code the warehouse uses for rows aborted by a sibling failure
pub const REASON_STOPPED: &str = "stopped";

/// One rejected row from a structured insert failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// Zero-based index of the row within the submitted batch
    pub index: usize,

    /// Machine-readable reason code (e.g. "invalid", "stopped")
    pub reason: String,

    /// Human-readable detail from the warehouse
    #[serde(default)]
    pub message: String,
}

impl RowError {
    /// True if this row was merely aborted because a sibling failed
    pub fn is_stopped(&self) -> bool {
        self.reason == REASON_STOPPED
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "row {}: {}", self.index, self.reason)
        } else {
            write!(f, "row {}: {} ({})", self.index, self.reason, self.message)
        }
    }
}

/// Drop `"stopped"` entries, keeping only rows that failed on their own.
pub fn surfaced_row_errors(errors: Vec<RowError>) -> Vec<RowError> {
    errors.into_iter().filter(|e| !e.is_stopped()).collect()
}
