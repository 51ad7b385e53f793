//! Warehouse client errors

use thiserror::Error;

/// Errors from warehouse and error-table clients
#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Request never produced a response (connect, timeout, TLS)
    #[error("warehouse request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the warehouse
    #[error("warehouse returned status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated by the caller
        body: String,
    },

    /// Response body could not be decoded
    #[error("malformed warehouse response: {0}")]
    InvalidResponse(String),

    /// Failure injected by a test double
    #[error("injected failure: {0}")]
    Injected(String),
}

impl WarehouseError {
    /// True for the network/rate-limit class of failures that a retry can
    /// plausibly fix: connect errors, timeouts, 5xx and 429.
    pub fn is_transient(&self) -> bool {
        match self {
            WarehouseError::Request(e) => e.is_timeout() || e.is_connect(),
            WarehouseError::Status { status, .. } => *status >= 500 || *status == 429,
            WarehouseError::InvalidResponse(_) => false,
            WarehouseError::Injected(msg) => msg.starts_with("transient"),
        }
    }
}
