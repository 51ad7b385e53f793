//! Hydrant - Protocol
//!
//! Domain types shared by every stage of the ingestion pipeline.
//!
//! # Architecture
//!
//! ```text
//! [Firehose] --Post--> [Windower] --Vec<Post>--> [Inserter] --ErrorRecord--> [Error table]
//! ```
//!
//! The types here are deliberately plain: no I/O, no channels, no clients.
//! Everything that touches the network lives in `hydrant_sinks`; everything
//! that schedules work lives in `hydrant_pipeline`.

mod error_record;
mod post;
mod retry;
mod row_error;
mod stream;

pub use error_record::ErrorRecord;
pub use post::{insert_id, Post};
pub use retry::RetryPolicy;
pub use row_error::{surfaced_row_errors, RowError, REASON_STOPPED};
pub use stream::StreamName;
