//! Write batching
//!
//! A `MapTransaction` exposes every `SqlExecutor` operation; nothing it
//! writes is visible outside until `commit`. Dropping it without committing
//! rolls back.

use crate::errors::{from_rusqlite, Result};
use crate::mapper::executor::SqlExecutor;
use crate::mapper::registry::TableRegistry;
use rowmap_core::logging_facility::SqlTrace;
use rowmap_core::{log_op_end, log_op_error, log_op_start};
use rusqlite::{Connection, Transaction};
use std::time::Instant;

pub struct MapTransaction<'a> {
    tx: Transaction<'a>,
    registry: &'a TableRegistry,
    trace: &'a SqlTrace,
    started: Instant,
}

impl<'a> MapTransaction<'a> {
    pub(crate) fn new(tx: Transaction<'a>, registry: &'a TableRegistry, trace: &'a SqlTrace) -> Self {
        trace.statement("BEGIN", &[]);
        log_op_start!("transaction");
        Self {
            tx,
            registry,
            trace,
            started: Instant::now(),
        }
    }

    /// Make every write in this transaction visible
    pub fn commit(self) -> Result<()> {
        self.trace.statement("COMMIT", &[]);
        let duration_ms = self.started.elapsed().as_millis() as u64;
        match self.tx.commit() {
            Ok(()) => {
                log_op_end!("transaction", duration_ms = duration_ms, outcome = "commit");
                Ok(())
            }
            Err(e) => {
                let err = from_rusqlite(e).with_op("commit");
                log_op_error!("transaction", err.clone(), duration_ms = duration_ms);
                Err(err)
            }
        }
    }

    /// Discard every write in this transaction
    pub fn rollback(self) -> Result<()> {
        self.trace.statement("ROLLBACK", &[]);
        let duration_ms = self.started.elapsed().as_millis() as u64;
        self.tx
            .rollback()
            .map_err(|e| from_rusqlite(e).with_op("rollback"))?;
        log_op_end!("transaction", duration_ms = duration_ms, outcome = "rollback");
        Ok(())
    }
}

impl SqlExecutor for MapTransaction<'_> {
    fn connection(&self) -> &Connection {
        &self.tx
    }

    fn registry(&self) -> &TableRegistry {
        self.registry
    }

    fn trace(&self) -> &SqlTrace {
        self.trace
    }
}
