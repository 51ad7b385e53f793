//! Idempotent batched insertion with bounded retry
//!
//! Submits one window's posts as a single insert-all request. Transient
//! failures (connect/timeout/5xx/rate-limit) are retried on an
//! exponential backoff schedule; structured per-row rejections are not —
//! retrying cannot make an invalid row valid, and the deterministic
//! insert ids already make a later resubmission of the valid siblings
//! safe. Backoff sleeps abort promptly on cancellation.
//!
//! The inserter does no durable reporting of its own; it hands the
//! outcome to the supervisor and stays quiet beyond debug traces.

use crate::{InsertFailure, InsertOutcome};
use hydrant_protocol::{surfaced_row_errors, Post, RetryPolicy};
use hydrant_sinks::{post_row, InsertRow, Warehouse};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Inserts batches into one destination table
pub struct BatchInserter<W> {
    warehouse: Arc<W>,
    table: String,
    policy: RetryPolicy,
}

impl<W: Warehouse> BatchInserter<W> {
    /// Create an inserter for `table`
    pub fn new(warehouse: Arc<W>, table: impl Into<String>, policy: RetryPolicy) -> Self {
        Self {
            warehouse,
            table: table.into(),
            policy,
        }
    }

    /// Destination table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Insert one batch, retrying transient failures per the policy.
    ///
    /// On success at any attempt the committed count equals the batch
    /// size. On exhaustion the last transport error is returned; a
    /// structured rejection is returned on first sight with its
    /// sibling-aborted entries filtered out.
    pub async fn insert(&self, batch: &[Post], cancel: &CancellationToken) -> InsertOutcome {
        let max_attempts = self.policy.attempts();
        let mut attempt = 1;

        loop {
            // Rows are rebuilt per attempt; insert ids are deterministic,
            // so a retry resubmits byte-identical rows.
            let rows: Vec<InsertRow> = batch.iter().map(|p| post_row(&self.table, p)).collect();

            match self.warehouse.insert_all(&self.table, rows).await {
                Ok(response) if response.is_success() => {
                    return InsertOutcome::Committed { rows: batch.len() };
                }
                Ok(response) => {
                    let errors = surfaced_row_errors(response.insert_errors);
                    return InsertOutcome::Failed(InsertFailure::Rejected {
                        errors,
                        batch_len: batch.len(),
                    });
                }
                Err(error) if error.is_transient() && attempt < max_attempts => {
                    let delay = self.policy.delay_for(attempt);
                    tracing::debug!(
                        table = %self.table,
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %error,
                        "transient insert failure, backing off"
                    );

                    tokio::select! {
                        _ = cancel.cancelled() => {
                            return InsertOutcome::Failed(InsertFailure::Transport {
                                attempts: attempt,
                                error,
                            });
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
                Err(error) => {
                    return InsertOutcome::Failed(InsertFailure::Transport {
                        attempts: attempt,
                        error,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "inserter_test.rs"]
mod inserter_test;
