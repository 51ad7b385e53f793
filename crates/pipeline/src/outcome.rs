//! Insert outcomes
//!
//! Produced by the [`BatchInserter`](crate::BatchInserter), consumed by
//! the [`Supervisor`](crate::Supervisor). Failures are data here, not
//! `Err` values: a failed batch is an expected outcome the supervisor
//! handles, not something to propagate with `?`.

use hydrant_protocol::RowError;
use hydrant_sinks::WarehouseError;

/// Result of inserting one batch, retries included
#[derive(Debug)]
pub enum InsertOutcome {
    /// The whole batch was committed
    Committed {
        /// Rows committed; equals the batch size
        rows: usize,
    },

    /// The batch permanently failed
    Failed(InsertFailure),
}

/// A permanently failed batch
#[derive(Debug)]
pub enum InsertFailure {
    /// Transport-level failure with no structural detail
    Transport {
        /// Attempts made before giving up
        attempts: u32,
        /// The final error
        error: WarehouseError,
    },

    /// Structured rejection; `errors` holds only rows that failed on
    /// their own (sibling-aborted entries already filtered)
    Rejected {
        /// Surfaced per-row errors
        errors: Vec<RowError>,
        /// Size of the submitted batch
        batch_len: usize,
    },
}

impl std::fmt::Display for InsertFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsertFailure::Transport { attempts, error } => {
                write!(f, "transport failure after {} attempt(s): {}", attempts, error)
            }
            InsertFailure::Rejected { errors, batch_len } => {
                write!(f, "{} of {} rows rejected", errors.len(), batch_len)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_transport() {
        let failure = InsertFailure::Transport {
            attempts: 3,
            error: WarehouseError::Injected("transient: down".into()),
        };
        assert_eq!(
            failure.to_string(),
            "transport failure after 3 attempt(s): injected failure: transient: down"
        );
    }

    #[test]
    fn test_display_rejected() {
        let failure = InsertFailure::Rejected {
            errors: vec![RowError {
                index: 1,
                reason: "invalid".into(),
                message: String::new(),
            }],
            batch_len: 50,
        };
        assert_eq!(failure.to_string(), "1 of 50 rows rejected");
    }
}
