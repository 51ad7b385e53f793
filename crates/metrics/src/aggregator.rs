//! Joint progress aggregator
//!
//! Combines the latest committed counts of the `sample` and `user`
//! pipelines into one joint value and samples it on a fixed interval.
//! The watch channels always hold the latest published count, so a
//! stream that goes quiet simply keeps contributing its last value —
//! exactly the frozen-side behavior the freeze policy wants.
//!
//! Completion doubles as the liveness signal for the whole pipeline
//! set: `run` returns only on cancellation, when every supervisor has
//! dropped its sender, or — under the `stop` policy — as soon as any
//! one of them has.

use crate::{HumanFormatter, JsonFormatter, ProgressFormatter};
use hydrant_config::{ProgressConfig, ProgressFormat, StreamEndPolicy};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// One sampled view of both stream counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JointProgress {
    /// Committed rows on the sample stream
    pub sample: u64,
    /// Committed rows on the user stream
    pub user: u64,
}

impl JointProgress {
    /// Rows committed across both streams
    pub fn total(&self) -> u64 {
        self.sample + self.user
    }
}

/// Periodic reporter of the joint stream progress
pub struct ProgressAggregator {
    config: ProgressConfig,
    formatter: Box<dyn ProgressFormatter>,
    sample: watch::Receiver<u64>,
    user: watch::Receiver<u64>,
}

impl ProgressAggregator {
    /// Create an aggregator over the two stream progress channels
    pub fn new(
        config: ProgressConfig,
        sample: watch::Receiver<u64>,
        user: watch::Receiver<u64>,
    ) -> Self {
        let formatter: Box<dyn ProgressFormatter> = match config.format {
            ProgressFormat::Human => Box::new(HumanFormatter::new()),
            ProgressFormat::Json => Box::new(JsonFormatter::new()),
        };

        Self {
            config,
            formatter,
            sample,
            user,
        }
    }

    /// Latest joint value, combined from whatever each stream last
    /// published
    pub fn snapshot(&self) -> JointProgress {
        JointProgress {
            sample: *self.sample.borrow(),
            user: *self.user.borrow(),
        }
    }

    fn report(&self) {
        let line = self.formatter.format(&self.snapshot());
        info!("{}", line);
    }

    /// Run until cancellation or until the supervisors stop.
    ///
    /// Spawn this as its own task; the binary's blocking wait is the
    /// join of this task and the supervisor tasks.
    pub async fn run(mut self, cancel: CancellationToken) {
        if !self.config.enabled {
            info!("progress reporting disabled");
            return;
        }

        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(
            interval_secs = self.config.interval.as_secs(),
            format = ?self.config.format,
            "progress reporter started"
        );

        let mut sample_open = true;
        let mut user_open = true;

        loop {
            let mut tick = false;
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    tick = true;
                }
                changed = self.sample.changed(), if sample_open => {
                    sample_open = changed.is_ok();
                }
                changed = self.user.changed(), if user_open => {
                    user_open = changed.is_ok();
                }
            }

            if tick {
                self.report();
                continue;
            }

            let all_stopped = !sample_open && !user_open;
            let any_stopped = !sample_open || !user_open;

            if all_stopped || (any_stopped && self.config.on_stream_end == StreamEndPolicy::Stop) {
                // Final joint line before the reporter goes away.
                self.report();
                info!(
                    sample_stopped = !sample_open,
                    user_stopped = !user_open,
                    "progress reporter stopping"
                );
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn channels() -> (
        watch::Sender<u64>,
        watch::Sender<u64>,
        watch::Receiver<u64>,
        watch::Receiver<u64>,
    ) {
        let (sample_tx, sample_rx) = watch::channel(0);
        let (user_tx, user_rx) = watch::channel(0);
        (sample_tx, user_tx, sample_rx, user_rx)
    }

    #[test]
    fn test_snapshot_combines_latest_values() {
        let (sample_tx, _user_tx, sample_rx, user_rx) = channels();
        let aggregator = ProgressAggregator::new(ProgressConfig::default(), sample_rx, user_rx);

        // Sample advances over several windows, user stays idle.
        sample_tx.send(100).unwrap();
        sample_tx.send(250).unwrap();

        let joint = aggregator.snapshot();
        assert_eq!(joint.sample, 250);
        assert_eq!(joint.user, 0);
        assert_eq!(joint.total(), 250);
    }

    #[test]
    fn test_snapshot_keeps_stopped_side_frozen() {
        let (sample_tx, user_tx, sample_rx, user_rx) = channels();
        let aggregator = ProgressAggregator::new(ProgressConfig::default(), sample_rx, user_rx);

        user_tx.send(40).unwrap();
        drop(user_tx); // the user stream stops

        sample_tx.send(500).unwrap();

        let joint = aggregator.snapshot();
        assert_eq!(joint.user, 40);
        assert_eq!(joint.sample, 500);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_completes_when_all_senders_drop() {
        let (sample_tx, user_tx, sample_rx, user_rx) = channels();
        let aggregator = ProgressAggregator::new(ProgressConfig::default(), sample_rx, user_rx);

        let handle = tokio::spawn(aggregator.run(CancellationToken::new()));

        sample_tx.send(10).unwrap();
        drop(sample_tx);
        drop(user_tx);

        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_freeze_policy_outlives_one_stream() {
        let (sample_tx, user_tx, sample_rx, user_rx) = channels();
        let config = ProgressConfig {
            interval: Duration::from_secs(1),
            ..ProgressConfig::default()
        };
        let aggregator = ProgressAggregator::new(config, sample_rx, user_rx);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(aggregator.run(cancel.clone()));

        drop(user_tx);
        // A few ticks with one stream stopped: the reporter must stay up.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!handle.is_finished());

        sample_tx.send(1).unwrap();
        drop(sample_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_policy_ends_with_first_stream() {
        let (_sample_tx, user_tx, sample_rx, user_rx) = channels();
        let config = ProgressConfig {
            on_stream_end: StreamEndPolicy::Stop,
            ..ProgressConfig::default()
        };
        let aggregator = ProgressAggregator::new(config, sample_rx, user_rx);

        let handle = tokio::spawn(aggregator.run(CancellationToken::new()));

        drop(user_tx);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_reporter_returns_immediately() {
        let (_sample_tx, _user_tx, sample_rx, user_rx) = channels();
        let config = ProgressConfig {
            enabled: false,
            ..ProgressConfig::default()
        };
        let aggregator = ProgressAggregator::new(config, sample_rx, user_rx);

        aggregator.run(CancellationToken::new()).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_reporter() {
        let (_sample_tx, _user_tx, sample_rx, user_rx) = channels();
        let aggregator =
            ProgressAggregator::new(ProgressConfig::default(), sample_rx, user_rx);

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(aggregator.run(cancel.clone()));

        cancel.cancel();
        handle.await.unwrap();
    }
}
