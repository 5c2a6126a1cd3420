//! SQL data type definitions

/// SQL column data types supported by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Integer,
    DoublePrecision,
    Varchar { max_length: Option<usize> },
    Boolean,
}

impl DataType {
    /// Get the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::DoublePrecision => "DOUBLE PRECISION",
            DataType::Varchar { .. } => "VARCHAR",
            DataType::Boolean => "BOOLEAN",
        }
    }
}
