//! Row representation

use wrensql_types::SqlValue;

/// Stable identity of a stored row within its table
pub type RowId = usize;

/// A single row of data - vector of SqlValues
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub values: Vec<SqlValue>,
}

impl Row {
    /// Create a new row from values
    pub fn new(values: Vec<SqlValue>) -> Self {
        Row { values }
    }

    /// Create an all-NULL row of the given width
    ///
    /// Used by the executor to pad unmatched outer-join rows; the result is
    /// indistinguishable from a stored row at the API surface but carries no
    /// row identity.
    pub fn nulls(width: usize) -> Self {
        Row { values: vec![SqlValue::Null; width] }
    }

    /// Get value at column index
    pub fn get(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Get number of columns in this row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if row is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
