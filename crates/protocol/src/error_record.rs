//! Durable failure records
//!
//! Every batch that permanently fails produces exactly one `ErrorRecord`
//! row in the error table. Records are write-once: nothing in the system
//! reads them back.

use crate::{RowError, StreamName};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row in the error table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// When the failure was observed
    pub occurred_at: DateTime<Utc>,

    /// Error class, e.g. "transport" or "rejected_rows"
    pub kind: String,

    /// Normalized single-line message
    pub message: String,

    /// Supporting detail (error chain, batch size, attempt count)
    pub context: String,

    /// Stream the failed batch belonged to
    pub stream: StreamName,
}

impl ErrorRecord {
    /// Record a transport-level failure (no structural detail available)
    pub fn transport(stream: StreamName, message: String, context: String) -> Self {
        Self {
            occurred_at: Utc::now(),
            kind: "transport".into(),
            message,
            context,
            stream,
        }
    }

    /// Record a structured rejection, joining the surfaced per-row
    /// reasons into one message.
    pub fn rejected_rows(stream: StreamName, errors: &[RowError], batch_len: usize) -> Self {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            occurred_at: Utc::now(),
            kind: "rejected_rows".into(),
            message,
            context: format!("{} of {} rows rejected", errors.len(), batch_len),
            stream,
        }
    }

    /// Record a failure of the error table itself (secondary record)
    pub fn error_table_failure(stream: StreamName, message: String) -> Self {
        Self {
            occurred_at: Utc::now(),
            kind: "error_table_write".into(),
            message,
            context: "previous error record could not be written".into(),
            stream,
        }
    }
}
