#![allow(dead_code)]

use wrensql_catalog::{ColumnSchema, IndexMetadata, TableSchema};
use wrensql_executor::{
    CompareOp, ExecutionContext, Expression, ExecutorError, JoinCursor, RangeDescriptor,
};
use wrensql_storage::{Database, Row};
use wrensql_types::{DataType, SqlValue};

pub fn int(v: i64) -> SqlValue {
    SqlValue::Integer(v)
}

pub fn opt_int(v: Option<i64>) -> SqlValue {
    v.map(SqlValue::Integer).unwrap_or(SqlValue::Null)
}

pub fn varchar(v: &str) -> SqlValue {
    SqlValue::Varchar(v.to_string())
}

pub fn col(range: usize, column: usize) -> Expression {
    Expression::column(range, column)
}

pub fn lit(v: SqlValue) -> Expression {
    Expression::literal(v)
}

pub fn cmp(op: CompareOp, left: Expression, right: Expression) -> Expression {
    Expression::compare(op, left, right)
}

/// Table events(a, b, c), all nullable integers, indexed on (a, b, c)
///
/// Index number 0; rows keep their insertion identities.
pub fn events_database(rows: &[(Option<i64>, Option<i64>, Option<i64>)]) -> Database {
    let mut db = Database::new();
    let table = db
        .create_table(TableSchema::new(
            "events",
            vec![
                ColumnSchema::new("a", DataType::Integer, true),
                ColumnSchema::new("b", DataType::Integer, true),
                ColumnSchema::new("c", DataType::Integer, true),
            ],
        ))
        .unwrap();
    table
        .create_index(IndexMetadata::new("ix_events_abc", "events", &["a", "b", "c"]))
        .unwrap();
    for &(a, b, c) in rows {
        table
            .insert(Row::new(vec![opt_int(a), opt_int(b), opt_int(c)]))
            .unwrap();
    }
    db
}

/// A spread of rows with NULLs, duplicates and ties on every index column
pub fn sample_events() -> Vec<(Option<i64>, Option<i64>, Option<i64>)> {
    vec![
        (None, Some(5), Some(1)),
        (Some(1), None, Some(2)),
        (Some(1), Some(5), None),
        (Some(1), Some(5), Some(9)),
        (Some(2), Some(3), Some(4)),
        (Some(2), Some(7), Some(0)),
        (Some(3), Some(1), Some(1)),
        (Some(3), Some(1), Some(1)),
    ]
}

/// customers(id, city) and orders(id, customer_id, amount)
///
/// Customer 2 has no orders; order 13 has a NULL customer. Orders carry an
/// index on customer_id (number 0).
pub fn shop_database() -> Database {
    let mut db = Database::new();
    let customers = db
        .create_table(TableSchema::new(
            "customers",
            vec![
                ColumnSchema::new("id", DataType::Integer, false),
                ColumnSchema::new("city", DataType::Varchar { max_length: None }, false),
            ],
        ))
        .unwrap();
    for (id, city) in [(1, "amsterdam"), (2, "brussels"), (3, "cologne")] {
        customers.insert(Row::new(vec![int(id), varchar(city)])).unwrap();
    }
    let orders = db
        .create_table(TableSchema::new(
            "orders",
            vec![
                ColumnSchema::new("id", DataType::Integer, false),
                ColumnSchema::new("customer_id", DataType::Integer, true),
                ColumnSchema::new("amount", DataType::Integer, false),
            ],
        ))
        .unwrap();
    orders
        .create_index(IndexMetadata::new("ix_orders_customer", "orders", &["customer_id"]))
        .unwrap();
    for (id, customer, amount) in [
        (10, Some(1), 100),
        (11, Some(1), 150),
        (12, Some(3), 50),
        (13, None, 75),
    ] {
        orders
            .insert(Row::new(vec![int(id), opt_int(customer), int(amount)]))
            .unwrap();
    }
    db
}

/// Drain a join over the given ranges, materializing every tuple
pub fn run_join(db: &Database, ranges: &[RangeDescriptor]) -> Vec<Vec<SqlValue>> {
    try_run_join(db, ranges).unwrap()
}

pub fn try_run_join(
    db: &Database,
    ranges: &[RangeDescriptor],
) -> Result<Vec<Vec<SqlValue>>, ExecutorError> {
    let mut ctx = ExecutionContext::new(db, ranges.len());
    let mut join = JoinCursor::new(ranges, &ctx)?;
    join.fetch_all(&mut ctx)
}

/// Reference semantics for `left op right` with NULL rejecting every row
pub fn naive_compare(op: CompareOp, left: Option<i64>, right: i64) -> bool {
    let Some(left) = left else { return false };
    match op {
        CompareOp::Equal => left == right,
        CompareOp::NotEqual => left != right,
        CompareOp::Greater => left > right,
        CompareOp::GreaterEqual => left >= right,
        CompareOp::Smaller => left < right,
        CompareOp::SmallerEqual => left <= right,
    }
}

pub fn event_tuple(row: &(Option<i64>, Option<i64>, Option<i64>)) -> Vec<SqlValue> {
    vec![opt_int(row.0), opt_int(row.1), opt_int(row.2)]
}

/// Sort tuples into a canonical order for set comparisons
pub fn canonical(mut tuples: Vec<Vec<SqlValue>>) -> Vec<Vec<SqlValue>> {
    tuples.sort_by(|a, b| {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| x.index_cmp(y))
            .find(|o| *o != std::cmp::Ordering::Equal)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    tuples
}
