//! Warehouse traits and wire types
//!
//! The batch-write API the pipeline is built against. The service
//! contract: submit a table name plus rows carrying insert ids; the
//! warehouse deduplicates on insert id and answers either "all committed"
//! or a structured list of per-row errors. The error table is a plain
//! single-row insert with no idempotency requirement.

use crate::WarehouseError;
use hydrant_protocol::{ErrorRecord, RowError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row submitted to the warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertRow {
    /// Idempotency key; the warehouse drops rows it has already seen
    pub insert_id: Uuid,

    /// Column name -> value mapping for this row
    pub json: serde_json::Value,
}

/// Warehouse answer to an insert-all request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResponse {
    /// Per-row errors; empty means every row was committed
    #[serde(default)]
    pub insert_errors: Vec<RowError>,
}

impl InsertResponse {
    /// True when the whole batch was committed
    pub fn is_success(&self) -> bool {
        self.insert_errors.is_empty()
    }
}

/// Batched, eventually-consistent write API of the analytical store
///
/// Implementations must be safe to share between both stream pipelines;
/// each pipeline issues at most one in-flight request at a time.
pub trait Warehouse: Send + Sync {
    /// Submit one batch to `table` as a single request.
    ///
    /// `Ok` covers both full commits and structured per-row rejections
    /// (inspect [`InsertResponse::insert_errors`]); `Err` is reserved for
    /// transport-level failures with no structural detail.
    fn insert_all(
        &self,
        table: &str,
        rows: Vec<InsertRow>,
    ) -> impl std::future::Future<Output = Result<InsertResponse, WarehouseError>> + Send;
}

/// Single-row insert API of the error table
pub trait ErrorTable: Send + Sync {
    /// Durably write one error record
    fn write(
        &self,
        record: &ErrorRecord,
    ) -> impl std::future::Future<Output = Result<(), WarehouseError>> + Send;
}
