//! Count/time windowing
//!
//! Groups the live post sequence into bounded batches. A window opens
//! when its first post arrives; it closes when `max_count` posts have
//! accumulated or `max_window` has elapsed since that first post,
//! whichever comes first. An idle window emits nothing, so a quiet
//! stream produces no empty batches.
//!
//! End-of-stream policy: a non-empty partial window is flushed when the
//! channel closes, then `next_batch` returns `None`. A replayed file
//! that ends mid-window must not lose its tail. Cancellation flushes the
//! same way.

use hydrant_protocol::Post;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Groups incoming posts into count/time-bounded batches
pub struct Windower {
    receiver: mpsc::Receiver<Post>,
    max_count: usize,
    max_window: Duration,
}

impl Windower {
    /// Create a windower over a live post channel.
    ///
    /// `max_count` must be >= 1 (enforced upstream by config validation).
    pub fn new(receiver: mpsc::Receiver<Post>, max_count: usize, max_window: Duration) -> Self {
        Self {
            receiver,
            max_count: max_count.max(1),
            max_window,
        }
    }

    /// Wait for the next batch.
    ///
    /// Returns `None` at end of stream (after any final flush) or when
    /// cancelled while idle. A returned batch is never empty and never
    /// larger than `max_count`.
    pub async fn next_batch(&mut self, cancel: &CancellationToken) -> Option<Vec<Post>> {
        // No deadline while idle: the window clock starts at the first post.
        let first = tokio::select! {
            _ = cancel.cancelled() => return None,
            post = self.receiver.recv() => post?,
        };

        let mut batch = Vec::with_capacity(self.max_count);
        batch.push(first);

        let deadline = Instant::now() + self.max_window;
        while batch.len() < self.max_count {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep_until(deadline) => break,
                post = self.receiver.recv() => match post {
                    Some(post) => batch.push(post),
                    // Channel closed: flush the partial window.
                    None => break,
                }
            }
        }

        Some(batch)
    }
}

#[cfg(test)]
#[path = "windower_test.rs"]
mod windower_test;
