//! Tests for ordered index seek positioning

use wrensql_catalog::IndexMetadata;
use wrensql_types::SqlValue;

use super::*;

fn int(v: i64) -> SqlValue {
    SqlValue::Integer(v)
}

/// Index on one column with keys: NULL, 10, 20, 20, 30 (row ids 0..5)
fn sample_index() -> OrderedIndex {
    let mut index = OrderedIndex::new(IndexMetadata::new("ix", "t", &["a"]), vec![0]);
    index.insert(vec![int(20)], 2);
    index.insert(vec![int(10)], 1);
    index.insert(vec![SqlValue::Null], 0);
    index.insert(vec![int(30)], 4);
    index.insert(vec![int(20)], 3);
    index
}

fn collect(mut cursor: ScanCursor<'_>) -> Vec<RowId> {
    let mut ids = Vec::new();
    while cursor.advance() {
        ids.push(cursor.current_row_id().unwrap());
    }
    ids
}

#[test]
fn nulls_sort_first_in_full_scan() {
    let index = sample_index();
    assert_eq!(collect(index.open_full_scan(false)), vec![0, 1, 2, 3, 4]);
    assert_eq!(collect(index.open_full_scan(true)), vec![4, 3, 2, 1, 0]);
}

#[test]
fn forward_seek_greater_equal() {
    let index = sample_index();
    assert_eq!(collect(index.open_forward(&[int(20)], SeekOp::GreaterEqual)), vec![2, 3, 4]);
}

#[test]
fn forward_seek_greater_skips_duplicates() {
    let index = sample_index();
    assert_eq!(collect(index.open_forward(&[int(20)], SeekOp::Greater)), vec![4]);
}

#[test]
fn forward_seek_past_maximum_yields_nothing() {
    let index = sample_index();
    assert_eq!(collect(index.open_forward(&[int(99)], SeekOp::GreaterEqual)), Vec::<RowId>::new());
}

#[test]
fn backward_seek_smaller_equal() {
    let index = sample_index();
    assert_eq!(collect(index.open_backward(&[int(20)], SeekOp::SmallerEqual)), vec![3, 2, 1, 0]);
}

#[test]
fn backward_seek_smaller_excludes_bound() {
    let index = sample_index();
    assert_eq!(collect(index.open_backward(&[int(20)], SeekOp::Smaller)), vec![1, 0]);
}

#[test]
fn backward_seek_above_maximum_degrades_to_open_ended() {
    let index = sample_index();
    assert_eq!(collect(index.open_backward(&[int(99)], SeekOp::SmallerEqual)), vec![4, 3, 2, 1, 0]);
}

#[test]
fn null_key_seeks_to_null_group() {
    let index = sample_index();
    // IS NULL maps to an inclusive seek on a NULL key; NULLs sort first
    let ids = collect(index.open_forward(&[SqlValue::Null], SeekOp::GreaterEqual));
    assert_eq!(ids.first(), Some(&0));
}

#[test]
fn multi_column_prefix_seek() {
    let mut index = OrderedIndex::new(IndexMetadata::new("ix2", "t", &["a", "b"]), vec![0, 1]);
    index.insert(vec![int(1), int(1)], 0);
    index.insert(vec![int(1), int(2)], 1);
    index.insert(vec![int(2), int(1)], 2);
    index.insert(vec![int(2), int(2)], 3);

    // Partial key on the leading column only
    assert_eq!(collect(index.open_forward(&[int(2)], SeekOp::GreaterEqual)), vec![2, 3]);
    // Full key, strict seek
    assert_eq!(collect(index.open_forward(&[int(1), int(1)], SeekOp::Greater)), vec![1, 2, 3]);
}
