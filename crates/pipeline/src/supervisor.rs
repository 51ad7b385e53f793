//! Per-stream supervisor
//!
//! Runs one stream's pipeline as a state machine:
//!
//! ```text
//! Windowing -> Inserting -> Succeeded  -> Windowing
//!                        -> Reporting  -> Windowing
//! ```
//!
//! The loop only leaves for `Stopped`: end of stream, cancellation, or a
//! resource error severe enough to abort the task. A failed batch is
//! recorded and the stream keeps consuming; its rows are not re-queued
//! (the retry layer already ran, and the error table holds the durable
//! trace).
//!
//! Progress is single-writer: the supervisor owns its committed count
//! and publishes snapshots through a `watch` channel the aggregator
//! reads. Dropping the sender is the "this stream stopped" signal.

use crate::{BatchInserter, ErrorSink, InsertOutcome, Windower};
use hydrant_protocol::StreamName;
use hydrant_sinks::{ErrorTable, Warehouse};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Drives one named stream from windowing to committed rows
pub struct Supervisor<W, T> {
    stream: StreamName,
    windower: Windower,
    inserter: BatchInserter<W>,
    error_sink: ErrorSink<T>,
    progress: watch::Sender<u64>,
    committed: u64,
}

impl<W: Warehouse, T: ErrorTable> Supervisor<W, T> {
    /// Wire up a supervisor for `stream`
    pub fn new(
        stream: StreamName,
        windower: Windower,
        inserter: BatchInserter<W>,
        error_sink: ErrorSink<T>,
        progress: watch::Sender<u64>,
    ) -> Self {
        Self {
            stream,
            windower,
            inserter,
            error_sink,
            progress,
            committed: 0,
        }
    }

    /// Run until end of stream or cancellation; returns the final
    /// committed count.
    pub async fn run(mut self, cancel: CancellationToken) -> u64 {
        tracing::info!(
            stream = %self.stream,
            table = self.inserter.table(),
            "stream pipeline started"
        );

        loop {
            // Windowing: the cancellation boundary between batches.
            if cancel.is_cancelled() {
                break;
            }

            let Some(batch) = self.windower.next_batch(&cancel).await else {
                break;
            };

            // Inserting
            match self.inserter.insert(&batch, &cancel).await {
                InsertOutcome::Committed { rows } => {
                    // Succeeded
                    self.committed += rows as u64;
                    // The aggregator may already be gone during shutdown.
                    let _ = self.progress.send(self.committed);
                    tracing::debug!(
                        stream = %self.stream,
                        rows,
                        total = self.committed,
                        "batch committed"
                    );
                }
                InsertOutcome::Failed(failure) => {
                    // Reporting: record durably, then resume windowing.
                    tracing::warn!(
                        stream = %self.stream,
                        rows = batch.len(),
                        failure = %failure,
                        "batch permanently failed, recording"
                    );
                    self.error_sink.record(&failure).await;
                }
            }
        }

        tracing::info!(
            stream = %self.stream,
            committed = self.committed,
            "stream pipeline stopped"
        );
        self.committed
    }
}

#[cfg(test)]
#[path = "supervisor_test.rs"]
mod supervisor_test;
