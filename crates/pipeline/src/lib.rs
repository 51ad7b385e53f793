//! Hydrant - Pipeline
//!
//! The per-stream ingestion pipeline: windowing, idempotent batched
//! insertion with bounded retry, durable failure recording, and the
//! supervisor loop that ties them together.
//!
//! # Architecture
//!
//! ```text
//! [Source] --Post--> [Windower] --Vec<Post>--> [BatchInserter] --> warehouse
//!                                                    |
//!                                               InsertOutcome
//!                                                    |
//!                                  [Supervisor] --ErrorRecord--> [ErrorSink]
//! ```
//!
//! # Key Design
//!
//! - **One task per stream**: windower, inserter and error sink run
//!   inline in the owning supervisor's task; a retrying insert blocks
//!   only its own stream.
//! - **Bounded memory**: the windower never buffers more than
//!   `max_count` posts, plus one batch in flight.
//! - **Failures never stop the stream**: a permanently failed batch is
//!   recorded and the loop re-enters windowing; only cancellation or
//!   end-of-stream stops a supervisor.
//! - **Single-writer progress**: each supervisor owns its committed
//!   count and publishes snapshots through a `watch` channel.

mod error_sink;
mod inserter;
mod outcome;
mod supervisor;
mod windower;

pub use error_sink::ErrorSink;
pub use inserter::BatchInserter;
pub use outcome::{InsertFailure, InsertOutcome};
pub use supervisor::Supervisor;
pub use windower::Windower;

/// Default channel buffer size between a source and its windower
pub const DEFAULT_SOURCE_CHANNEL_SIZE: usize = 1024;
