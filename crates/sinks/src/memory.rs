//! In-memory warehouse
//!
//! A process-local implementation of both sink traits, used for local
//! runs without a warehouse and for exercising the pipeline in tests.
//! It honors the same dedupe contract as the real service: rows are keyed
//! by insert id, so a resubmitted batch never double-counts.
//!
//! Tests can script the next outcomes with [`MemoryWarehouse::fail_with`]
//! and [`MemoryWarehouse::reject_with`]; scripted outcomes are consumed
//! in order before normal inserts resume.

use crate::{ErrorTable, InsertResponse, InsertRow, Warehouse, WarehouseError};
use hydrant_protocol::{ErrorRecord, RowError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

enum ScriptedOutcome {
    Transport(WarehouseError),
    Rejected(Vec<RowError>),
}

/// In-memory batch-write store with insert-id dedupe
#[derive(Default)]
pub struct MemoryWarehouse {
    tables: Mutex<HashMap<String, HashMap<Uuid, serde_json::Value>>>,
    scripted: Mutex<VecDeque<ScriptedOutcome>>,
    insert_calls: AtomicU64,
}

impl MemoryWarehouse {
    /// Create an empty warehouse
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a transport failure for an upcoming insert
    pub fn fail_with(&self, error: WarehouseError) {
        self.scripted
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Transport(error));
    }

    /// Queue a structured rejection for an upcoming insert
    pub fn reject_with(&self, errors: Vec<RowError>) {
        self.scripted
            .lock()
            .unwrap()
            .push_back(ScriptedOutcome::Rejected(errors));
    }

    /// Number of distinct rows stored in `table`
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(|rows| rows.len())
            .unwrap_or(0)
    }

    /// Total insert-all calls observed, scripted outcomes included
    pub fn insert_calls(&self) -> u64 {
        self.insert_calls.load(Ordering::Relaxed)
    }
}

impl Warehouse for MemoryWarehouse {
    async fn insert_all(
        &self,
        table: &str,
        rows: Vec<InsertRow>,
    ) -> Result<InsertResponse, WarehouseError> {
        self.insert_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(outcome) = self.scripted.lock().unwrap().pop_front() {
            return match outcome {
                ScriptedOutcome::Transport(error) => Err(error),
                ScriptedOutcome::Rejected(insert_errors) => Ok(InsertResponse { insert_errors }),
            };
        }

        let mut tables = self.tables.lock().unwrap();
        let stored = tables.entry(table.to_string()).or_default();
        for row in rows {
            stored.insert(row.insert_id, row.json);
        }

        Ok(InsertResponse::default())
    }
}

/// In-memory error table
#[derive(Default)]
pub struct MemoryErrorTable {
    records: Mutex<Vec<ErrorRecord>>,
    scripted: Mutex<VecDeque<WarehouseError>>,
    write_calls: AtomicU64,
}

impl MemoryErrorTable {
    /// Create an empty error table
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for an upcoming write
    pub fn fail_with(&self, error: WarehouseError) {
        self.scripted.lock().unwrap().push_back(error);
    }

    /// Snapshot of everything written so far
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Total write calls observed, failed ones included
    pub fn write_calls(&self) -> u64 {
        self.write_calls.load(Ordering::Relaxed)
    }
}

impl ErrorTable for MemoryErrorTable {
    async fn write(&self, record: &ErrorRecord) -> Result<(), WarehouseError> {
        self.write_calls.fetch_add(1, Ordering::Relaxed);

        if let Some(error) = self.scripted.lock().unwrap().pop_front() {
            return Err(error);
        }

        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
