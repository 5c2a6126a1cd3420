//! Execution context
//!
//! Holds everything a `next()` call needs: the database being read, the row
//! currently bound for each range, and the abort flags. The abort flags are
//! explicit fields reachable from the context rather than process globals,
//! so concurrent executions of the same compiled query never interfere.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use wrensql_storage::{Database, Row};
use wrensql_types::SqlValue;

use crate::errors::ExecutorError;

/// Per-execution state threaded through every cursor call
pub struct ExecutionContext<'a> {
    database: &'a Database,
    /// Row currently bound per range, indexed by join-order position
    current_rows: Vec<Option<Row>>,
    transaction_aborted: Arc<AtomicBool>,
    action_aborted: Arc<AtomicBool>,
}

impl<'a> ExecutionContext<'a> {
    /// Create a context for an execution over `range_count` ranges
    pub fn new(database: &'a Database, range_count: usize) -> Self {
        ExecutionContext {
            database,
            current_rows: vec![None; range_count],
            transaction_aborted: Arc::new(AtomicBool::new(false)),
            action_aborted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a context sharing externally owned abort flags
    pub fn with_abort_flags(
        database: &'a Database,
        range_count: usize,
        transaction_aborted: Arc<AtomicBool>,
        action_aborted: Arc<AtomicBool>,
    ) -> Self {
        ExecutionContext {
            database,
            current_rows: vec![None; range_count],
            transaction_aborted,
            action_aborted,
        }
    }

    /// The database this execution reads
    pub fn database(&self) -> &'a Database {
        self.database
    }

    /// Number of range slots
    pub fn range_count(&self) -> usize {
        self.current_rows.len()
    }

    /// Bind (or unbind) the current row of a range
    pub fn bind_row(&mut self, range: usize, row: Option<Row>) {
        self.current_rows[range] = row;
    }

    /// The row currently bound for a range, if any
    pub fn current_row(&self, range: usize) -> Option<&Row> {
        self.current_rows.get(range).and_then(|r| r.as_ref())
    }

    /// Value of one column of the row bound for a range
    pub(crate) fn column_value(
        &self,
        range: usize,
        column: usize,
    ) -> Result<SqlValue, ExecutorError> {
        let row = self
            .current_rows
            .get(range)
            .and_then(|r| r.as_ref())
            .ok_or(ExecutorError::RangeNotBound { range })?;
        row.get(column)
            .cloned()
            .ok_or(ExecutorError::ColumnIndexOutOfBounds { index: column })
    }

    /// Raise if either abort flag is set; called on every cursor advance
    pub fn check_aborted(&self) -> Result<(), ExecutorError> {
        if self.transaction_aborted.load(Ordering::SeqCst) {
            return Err(ExecutorError::TransactionAborted);
        }
        if self.action_aborted.load(Ordering::SeqCst) {
            return Err(ExecutorError::ActionAborted);
        }
        Ok(())
    }

    /// Handle for setting the transaction abort flag from outside
    pub fn transaction_abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.transaction_aborted)
    }

    /// Handle for setting the action abort flag from outside
    pub fn action_abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.action_aborted)
    }
}
