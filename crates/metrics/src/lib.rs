//! Hydrant - Metrics
//!
//! Joint progress reporting across the two stream pipelines.
//!
//! # Overview
//!
//! Each supervisor publishes its committed count through a `watch`
//! channel. The [`ProgressAggregator`] combines the latest value from
//! both channels, samples the joint view on a fixed interval, and emits
//! one formatted line per tick via `tracing`. It also doubles as the
//! liveness signal: it completes only when cancelled or when every
//! supervisor has stopped (dropped its sender).

mod aggregator;
mod format;

pub use aggregator::{JointProgress, ProgressAggregator};
pub use format::{HumanFormatter, JsonFormatter, ProgressFormatter};
