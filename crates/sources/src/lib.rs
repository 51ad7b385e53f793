//! Hydrant - Sources
//!
//! Upstream adapters that feed posts into a stream pipeline's channel.
//! The pipeline itself only ever sees an `mpsc::Receiver<Post>`; anything
//! able to produce posts qualifies as a source. Shipped here: JSONL
//! replay from a file or stdin, which is how recorded firehose captures
//! are fed through the ingestor.

mod common;
mod jsonl;

pub use common::{SourceError, SourceMetrics, SourceMetricsSnapshot};
pub use jsonl::{open_reader, JsonlSource};
