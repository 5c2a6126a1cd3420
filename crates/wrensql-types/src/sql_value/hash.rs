//! Hash implementation for SqlValue

use std::hash::{Hash, Hasher};

use crate::sql_value::SqlValue;

/// Hash implementation for SqlValue
///
/// Custom implementation to handle floating-point values correctly:
/// - NaN values are treated as equal (hash to same value)
/// - Uses to_bits() for floats to ensure consistent hashing
/// - NULL hashes to its discriminant only
impl Hash for SqlValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        use SqlValue::*;

        // Hash discriminant first to distinguish variants
        std::mem::discriminant(self).hash(state);

        match self {
            Integer(i) => i.hash(state),
            Double(d) => {
                if d.is_nan() {
                    f64::NAN.to_bits().hash(state);
                } else {
                    d.to_bits().hash(state);
                }
            }
            Varchar(s) => s.hash(state),
            Boolean(b) => b.hash(state),
            Null => {}
        }
    }
}
