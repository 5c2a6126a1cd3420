//! Executor error types

use wrensql_types::SqlValue;

/// Errors raised during scan and join execution
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutorError {
    /// The enclosing transaction was aborted; raised from any `next()` call
    TransactionAborted,
    /// The current action was aborted; raised from any `next()` call
    ActionAborted,
    /// Internal invariant violation in a compiled scan plan; never expected
    /// from a correctly compiled query
    MalformedScanPlan(String),
    /// A predicate referenced a range with no row currently bound
    RangeNotBound { range: usize },
    ColumnIndexOutOfBounds { index: usize },
    TypeMismatch {
        left: SqlValue,
        op: String,
        right: SqlValue,
    },
    TableNotFound(String),
    IndexNotFound(String),
    StorageError(String),
}

impl std::fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutorError::TransactionAborted => write!(f, "Transaction aborted"),
            ExecutorError::ActionAborted => write!(f, "Action aborted"),
            ExecutorError::MalformedScanPlan(detail) => {
                write!(f, "Internal error: malformed scan plan: {}", detail)
            }
            ExecutorError::RangeNotBound { range } => {
                write!(f, "No row bound for range {}", range)
            }
            ExecutorError::ColumnIndexOutOfBounds { index } => {
                write!(f, "Column index {} out of bounds", index)
            }
            ExecutorError::TypeMismatch { left, op, right } => {
                write!(
                    f,
                    "Cannot compare {} {} {}",
                    left.type_name(),
                    op,
                    right.type_name()
                )
            }
            ExecutorError::TableNotFound(name) => write!(f, "Table '{}' not found", name),
            ExecutorError::IndexNotFound(name) => write!(f, "Index '{}' not found", name),
            ExecutorError::StorageError(message) => write!(f, "Storage error: {}", message),
        }
    }
}

impl std::error::Error for ExecutorError {}

impl From<wrensql_storage::StorageError> for ExecutorError {
    fn from(err: wrensql_storage::StorageError) -> Self {
        match err {
            wrensql_storage::StorageError::TableNotFound(name) => {
                ExecutorError::TableNotFound(name)
            }
            wrensql_storage::StorageError::IndexNotFound(name) => {
                ExecutorError::IndexNotFound(name)
            }
            other => ExecutorError::StorageError(other.to_string()),
        }
    }
}
