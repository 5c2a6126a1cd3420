//! Comparison implementations for SqlValue

use std::cmp::Ordering;

use crate::sql_value::SqlValue;

/// PartialOrd implementation for SQL value comparison
///
/// Implements SQL:1999 comparison semantics:
/// - NULL comparisons return None (SQL UNKNOWN)
/// - Type mismatches return None (incomparable), except numeric widening
/// - NaN in floating point returns None (IEEE 754 semantics)
/// - All other comparisons follow Rust's natural ordering
impl PartialOrd for SqlValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use SqlValue::*;
        match (self, other) {
            // NULL comparisons return None (SQL UNKNOWN semantics)
            (Null, _) | (_, Null) => None,

            (Integer(a), Integer(b)) => a.partial_cmp(b),

            // Floating point (handles NaN properly via IEEE 754)
            (Double(a), Double(b)) => a.partial_cmp(b),

            // Numeric widening between integer and double
            (Integer(a), Double(b)) => (*a as f64).partial_cmp(b),
            (Double(a), Integer(b)) => a.partial_cmp(&(*b as f64)),

            // String types (lexicographic comparison)
            (Varchar(a), Varchar(b)) => a.partial_cmp(b),

            // Boolean (false < true in SQL)
            (Boolean(a), Boolean(b)) => a.partial_cmp(b),

            // Type mismatch - incomparable (SQL:1999 behavior)
            _ => None,
        }
    }
}

/// Eq implementation for SqlValue
///
/// For index keys and grouping we need Eq semantics where NULL == NULL,
/// unlike SQL comparison semantics.
impl Eq for SqlValue {}

impl SqlValue {
    /// Total ordering used by ordered indexes.
    ///
    /// Unlike `partial_cmp`, every pair of values is ordered:
    /// - NULL sorts before every non-NULL value
    /// - mixed numeric types compare by numeric value
    /// - remaining cross-type pairs order by a fixed type rank
    /// - NaN sorts after every other double
    pub fn index_cmp(&self, other: &SqlValue) -> Ordering {
        use SqlValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Double(a), Double(b)) => total_cmp_f64(*a, *b),
            (Integer(a), Double(b)) => total_cmp_f64(*a as f64, *b),
            (Double(a), Integer(b)) => total_cmp_f64(*a, *b as f64),
            _ => match self.partial_cmp(other) {
                Some(ordering) => ordering,
                None => type_rank(self).cmp(&type_rank(other)),
            },
        }
    }
}

fn total_cmp_f64(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        // NaN involved: NaN sorts last, NaN == NaN for ordering purposes
        None => match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => unreachable!("non-NaN doubles always compare"),
        },
    }
}

fn type_rank(value: &SqlValue) -> u8 {
    match value {
        SqlValue::Null => 0,
        SqlValue::Boolean(_) => 1,
        SqlValue::Integer(_) | SqlValue::Double(_) => 2,
        SqlValue::Varchar(_) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_comparisons_are_unknown() {
        assert_eq!(SqlValue::Null.partial_cmp(&SqlValue::Integer(1)), None);
        assert_eq!(SqlValue::Integer(1).partial_cmp(&SqlValue::Null), None);
    }

    #[test]
    fn numeric_widening() {
        assert_eq!(
            SqlValue::Integer(2).partial_cmp(&SqlValue::Double(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            SqlValue::Double(3.0).partial_cmp(&SqlValue::Integer(3)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn index_cmp_sorts_nulls_first() {
        assert_eq!(SqlValue::Null.index_cmp(&SqlValue::Integer(i64::MIN)), Ordering::Less);
        assert_eq!(SqlValue::Integer(i64::MIN).index_cmp(&SqlValue::Null), Ordering::Greater);
        assert_eq!(SqlValue::Null.index_cmp(&SqlValue::Null), Ordering::Equal);
    }

    #[test]
    fn index_cmp_is_total_over_nan() {
        let nan = SqlValue::Double(f64::NAN);
        assert_eq!(nan.index_cmp(&SqlValue::Double(f64::MAX)), Ordering::Greater);
        assert_eq!(nan.index_cmp(&nan), Ordering::Equal);
    }
}
