//! Table schema definitions

use crate::ColumnSchema;

/// Schema for a table: its name and ordered column definitions
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    /// Table name
    pub name: String,
    /// Ordered column definitions
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Create a new table schema
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        TableSchema { name: name.into(), columns }
    }

    /// Number of columns in the table
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Find the position of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get a column definition by position
    pub fn column(&self, index: usize) -> Option<&ColumnSchema> {
        self.columns.get(index)
    }
}
