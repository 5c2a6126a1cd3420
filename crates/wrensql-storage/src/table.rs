//! Table storage: rows plus their ordered indexes

use wrensql_catalog::{IndexMetadata, TableSchema};
use wrensql_types::SqlValue;

use crate::cursor::ScanCursor;
use crate::error::StorageError;
use crate::index::OrderedIndex;
use crate::row::{Row, RowId};

/// An in-memory table: schema, row store and ordered indexes
///
/// Row identities are insertion positions and remain stable; the row-order
/// scan stands in for the default/primary index of the table.
#[derive(Debug)]
pub struct Table {
    schema: TableSchema,
    rows: Vec<Row>,
    indexes: Vec<OrderedIndex>,
}

impl Table {
    /// Create an empty table with the given schema
    pub fn new(schema: TableSchema) -> Self {
        Table { schema, rows: Vec::new(), indexes: Vec::new() }
    }

    /// The table schema
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of columns in the table
    pub fn column_count(&self) -> usize {
        self.schema.column_count()
    }

    /// Number of stored rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// All stored rows in row order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Insert a row, updating every index; returns the new row's identity
    pub fn insert(&mut self, row: Row) -> Result<RowId, StorageError> {
        if row.len() != self.schema.column_count() {
            return Err(StorageError::ColumnCountMismatch {
                expected: self.schema.column_count(),
                provided: row.len(),
            });
        }
        let row_id = self.rows.len();
        for index in &mut self.indexes {
            index.insert(extract_key(&row, index.sort_columns()), row_id);
        }
        self.rows.push(row);
        Ok(row_id)
    }

    /// Fetch a stored row by identity
    pub fn row(&self, row_id: RowId) -> Result<&Row, StorageError> {
        self.rows.get(row_id).ok_or(StorageError::RowNotFound { row_id })
    }

    /// Create an ordered index from catalog metadata; returns its number
    ///
    /// Existing rows are indexed immediately and later inserts keep the
    /// index current.
    pub fn create_index(&mut self, metadata: IndexMetadata) -> Result<usize, StorageError> {
        let mut columns = Vec::with_capacity(metadata.column_count());
        for indexed in &metadata.columns {
            let position = self.schema.column_index(&indexed.column_name).ok_or_else(|| {
                StorageError::ColumnNotFound {
                    column_name: indexed.column_name.clone(),
                    table_name: self.schema.name.clone(),
                }
            })?;
            columns.push(position);
        }
        let mut index = OrderedIndex::new(metadata, columns);
        for (row_id, row) in self.rows.iter().enumerate() {
            index.insert(extract_key(row, index.sort_columns()), row_id);
        }
        self.indexes.push(index);
        Ok(self.indexes.len() - 1)
    }

    /// Get an index by number
    pub fn index(&self, number: usize) -> Option<&OrderedIndex> {
        self.indexes.get(number)
    }

    /// Find an index by name
    pub fn index_by_name(&self, name: &str) -> Option<(usize, &OrderedIndex)> {
        self.indexes.iter().enumerate().find(|(_, ix)| ix.name() == name)
    }

    /// Open a full scan in row order, optionally reversed
    pub fn open_full_scan(&self, reversed: bool) -> ScanCursor<'_> {
        ScanCursor::over_rows(self.rows.len(), reversed)
    }
}

fn extract_key(row: &Row, columns: &[usize]) -> Vec<SqlValue> {
    columns
        .iter()
        .map(|&c| row.get(c).cloned().unwrap_or(SqlValue::Null))
        .collect()
}
