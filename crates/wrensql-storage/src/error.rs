//! Storage error types

/// Errors raised by the storage layer
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    TableNotFound(String),
    TableAlreadyExists(String),
    IndexNotFound(String),
    ColumnNotFound { column_name: String, table_name: String },
    ColumnCountMismatch { expected: usize, provided: usize },
    RowNotFound { row_id: usize },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::TableNotFound(name) => write!(f, "Table '{}' not found", name),
            StorageError::TableAlreadyExists(name) => {
                write!(f, "Table '{}' already exists", name)
            }
            StorageError::IndexNotFound(name) => write!(f, "Index '{}' not found", name),
            StorageError::ColumnNotFound { column_name, table_name } => {
                write!(f, "Column '{}' not found in table '{}'", column_name, table_name)
            }
            StorageError::ColumnCountMismatch { expected, provided } => {
                write!(f, "Expected {} column values, got {}", expected, provided)
            }
            StorageError::RowNotFound { row_id } => write!(f, "Row {} not found", row_id),
        }
    }
}

impl std::error::Error for StorageError {}
