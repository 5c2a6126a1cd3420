//! Display implementation for SqlValue

use std::fmt;

use crate::sql_value::SqlValue;

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Integer(i) => write!(f, "{}", i),
            SqlValue::Double(d) => write!(f, "{}", d),
            SqlValue::Varchar(s) => write!(f, "{}", s),
            SqlValue::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            SqlValue::Null => write!(f, "NULL"),
        }
    }
}
