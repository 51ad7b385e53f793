//! Durable failure recording
//!
//! Turns a permanently failed batch into exactly one error-table row.
//! The write itself is best-effort with no retry: if it fails, the
//! failure goes to local diagnostics and one more write describing the
//! secondary failure is attempted; if that also fails, the second
//! diagnostic line is the end of it. Nothing on this path can stall or
//! stop the ingestion pipeline.

use crate::InsertFailure;
use hydrant_protocol::{ErrorRecord, StreamName};
use hydrant_sinks::ErrorTable;
use std::sync::Arc;

/// Best-effort writer of [`ErrorRecord`] rows for one stream
pub struct ErrorSink<T> {
    stream: StreamName,
    table: Arc<T>,
}

impl<T: ErrorTable> ErrorSink<T> {
    /// Create an error sink for `stream`
    pub fn new(stream: StreamName, table: Arc<T>) -> Self {
        Self { stream, table }
    }

    /// Record a permanently failed batch. Never fails, never panics.
    pub async fn record(&self, failure: &InsertFailure) {
        let record = self.normalize(failure);

        let Err(primary) = self.table.write(&record).await else {
            return;
        };

        tracing::error!(
            stream = %self.stream,
            error = %primary,
            "error table write failed, attempting secondary record"
        );

        let secondary = ErrorRecord::error_table_failure(self.stream, primary.to_string());
        if let Err(second) = self.table.write(&secondary).await {
            tracing::error!(
                stream = %self.stream,
                error = %second,
                "secondary error record also failed, dropping"
            );
        }
    }

    /// Normalize a failure into one record, preferring the innermost
    /// cause a transport error carries.
    fn normalize(&self, failure: &InsertFailure) -> ErrorRecord {
        match failure {
            InsertFailure::Transport { attempts, error } => ErrorRecord::transport(
                self.stream,
                root_cause(error),
                format!("gave up after {} attempt(s)", attempts),
            ),
            InsertFailure::Rejected { errors, batch_len } => {
                ErrorRecord::rejected_rows(self.stream, errors, *batch_len)
            }
        }
    }
}

/// Innermost cause in an error chain, falling back to the top-level
/// display when there is no source.
fn root_cause(error: &dyn std::error::Error) -> String {
    let mut current = error;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
