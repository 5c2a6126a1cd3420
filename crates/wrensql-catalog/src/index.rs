//! Index metadata definitions
//!
//! Metadata for ordered indexes tracked in the catalog, independent of the
//! physical index storage.

/// Index metadata stored in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMetadata {
    /// Name of the index
    pub name: String,
    /// Name of the table this index belongs to
    pub table_name: String,
    /// Columns included in the index, leading column first
    pub columns: Vec<IndexedColumn>,
    /// Whether this index enforces uniqueness
    pub is_unique: bool,
}

/// Column specification within an index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedColumn {
    /// Column name
    pub column_name: String,
    /// Sort order for the column
    pub order: SortOrder,
}

/// Sort order for indexed columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl IndexMetadata {
    /// Create a new index metadata entry with all columns ascending
    pub fn new(
        name: impl Into<String>,
        table_name: impl Into<String>,
        column_names: &[&str],
    ) -> Self {
        IndexMetadata {
            name: name.into(),
            table_name: table_name.into(),
            columns: column_names
                .iter()
                .map(|c| IndexedColumn {
                    column_name: (*c).to_string(),
                    order: SortOrder::Ascending,
                })
                .collect(),
            is_unique: false,
        }
    }

    /// Number of columns covered by the index
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
