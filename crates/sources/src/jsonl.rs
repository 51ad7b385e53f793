//! JSONL replay source
//!
//! Reads newline-delimited JSON posts from any async reader and feeds
//! them into the pipeline channel. Malformed lines are counted, logged
//! at warn level and skipped; the stream must survive a bad record the
//! same way it survives a bad batch further down.
//!
//! End of input drops the sender, which is the pipeline's end-of-stream
//! signal.

use crate::{SourceError, SourceMetrics, SourceMetricsSnapshot};
use hydrant_protocol::Post;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Boxed reader produced by [`open_reader`]
pub type BoxedReader = Box<dyn AsyncBufRead + Send + Unpin>;

/// Open a replay source path; `"-"` means stdin.
pub async fn open_reader(path: &str) -> Result<BoxedReader, SourceError> {
    if path == "-" {
        Ok(Box::new(BufReader::new(tokio::io::stdin())))
    } else {
        let file = File::open(path).await?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Feeds JSONL posts from a reader into a pipeline channel
pub struct JsonlSource<R> {
    name: String,
    reader: R,
    sender: mpsc::Sender<Post>,
    metrics: Arc<SourceMetrics>,
}

impl<R: AsyncBufRead + Unpin> JsonlSource<R> {
    /// Create a source reading from `reader`
    pub fn new(name: impl Into<String>, reader: R, sender: mpsc::Sender<Post>) -> Self {
        Self {
            name: name.into(),
            reader,
            sender,
            metrics: Arc::new(SourceMetrics::new()),
        }
    }

    /// Shared handle to this source's metrics
    pub fn metrics(&self) -> Arc<SourceMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Run until the reader is exhausted, the pipeline goes away, or
    /// cancellation. Returns the final counters.
    pub async fn run(self, cancel: CancellationToken) -> Result<SourceMetricsSnapshot, SourceError> {
        let mut lines = self.reader.lines();

        loop {
            let line = tokio::select! {
                _ = cancel.cancelled() => break,
                line = lines.next_line() => line?,
            };

            let Some(line) = line else {
                break; // end of input
            };
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<Post>(&line) {
                Ok(post) => {
                    self.metrics.record_post();
                    if self.sender.send(post).await.is_err() {
                        // Pipeline stopped; nothing left to feed.
                        break;
                    }
                }
                Err(e) => {
                    self.metrics.record_malformed();
                    tracing::warn!(
                        source = %self.name,
                        error = %e,
                        "skipping malformed firehose line"
                    );
                }
            }
        }

        let snapshot = self.metrics.snapshot();
        tracing::info!(
            source = %self.name,
            posts = snapshot.posts_read,
            malformed = snapshot.malformed_lines,
            "source drained"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
#[path = "jsonl_test.rs"]
mod jsonl_test;
