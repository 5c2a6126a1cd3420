//! Column schema definitions

use wrensql_types::DataType;

/// Schema for a single table column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,
    /// Column data type
    pub data_type: DataType,
    /// Whether the column accepts NULL values
    pub nullable: bool,
}

impl ColumnSchema {
    /// Create a new column schema
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        ColumnSchema { name: name.into(), data_type, nullable }
    }
}
