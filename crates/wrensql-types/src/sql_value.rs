//! SQL Value runtime representation

mod comparison;
mod display;
mod hash;

use crate::DataType;

/// SQL Values - runtime representation of data
///
/// Represents actual values in SQL, including NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Double(f64),
    Varchar(String),
    Boolean(bool),
    Null,
}

impl SqlValue {
    /// Check if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Get the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Integer(_) => "INTEGER",
            SqlValue::Double(_) => "DOUBLE PRECISION",
            SqlValue::Varchar(_) => "VARCHAR",
            SqlValue::Boolean(_) => "BOOLEAN",
            SqlValue::Null => "NULL",
        }
    }

    /// Get the data type of this value, if it has one (NULL is untyped)
    pub fn get_type(&self) -> Option<DataType> {
        match self {
            SqlValue::Integer(_) => Some(DataType::Integer),
            SqlValue::Double(_) => Some(DataType::DoublePrecision),
            SqlValue::Varchar(_) => Some(DataType::Varchar { max_length: None }),
            SqlValue::Boolean(_) => Some(DataType::Boolean),
            SqlValue::Null => None,
        }
    }
}
