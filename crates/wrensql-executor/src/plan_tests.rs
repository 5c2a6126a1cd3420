use wrensql_storage::{Database, SeekOp};
use wrensql_types::SqlValue;

use super::*;
use crate::expr::{CompareOp, Expression};

fn int(v: i64) -> Expression {
    Expression::literal(SqlValue::Integer(v))
}

fn col(column: usize) -> Expression {
    Expression::column(0, column)
}

fn cmp(column: usize, op: CompareOp, v: i64) -> Expression {
    Expression::compare(op, col(column), int(v))
}

/// Plan over a three-column index on table columns (0, 1, 2)
fn plan_abc() -> ScanPlan {
    ScanPlan::with_index(0, 0, vec![0, 1, 2]).unwrap()
}

fn seek_of(plan: &ScanPlan) -> Seek {
    let db = Database::new();
    let ctx = ExecutionContext::new(&db, 1);
    plan.seek(&ctx).unwrap()
}

#[test]
fn equality_conjuncts_extend_the_prefix() {
    let mut plan = plan_abc();
    plan.add_condition(cmp(0, CompareOp::Equal, 1));
    plan.add_condition(cmp(1, CompareOp::Equal, 2));
    assert_eq!(plan.matched_column_count(), 2);
    assert!(plan.residual().is_none());
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Integer(1), SqlValue::Integer(2)]);
            assert_eq!(op, SeekOp::GreaterEqual);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
}

#[test]
fn range_bound_freezes_the_prefix() {
    let mut plan = plan_abc();
    plan.add_condition(cmp(0, CompareOp::Equal, 1));
    plan.add_condition(cmp(1, CompareOp::Greater, 5));
    // c = 3 arrives after the prefix froze: residual only
    plan.add_condition(cmp(2, CompareOp::Equal, 3));
    assert_eq!(plan.matched_column_count(), 1);
    assert!(plan.residual().is_some());
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Integer(1), SqlValue::Integer(5)]);
            assert_eq!(op, SeekOp::Greater);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
}

#[test]
fn is_null_counts_as_equality() {
    let mut plan = plan_abc();
    plan.add_condition(Expression::is_null(col(0)));
    plan.add_condition(cmp(1, CompareOp::Equal, 2));
    assert_eq!(plan.matched_column_count(), 2);
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Null, SqlValue::Integer(2)]);
            assert_eq!(op, SeekOp::GreaterEqual);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
}

#[test]
fn upper_bound_alone_skips_the_null_group() {
    // NULLs sort first, so a < 10 must still seek past the NULL group or
    // the end guard would stop the scan on the very first entry
    let mut plan = plan_abc();
    plan.add_condition(cmp(0, CompareOp::Smaller, 10));
    assert!(plan.end_guard().is_some());
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Null]);
            assert_eq!(op, SeekOp::Greater);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
}

#[test]
fn lower_and_upper_bounds_share_a_column() {
    let mut plan = plan_abc();
    plan.add_condition(cmp(0, CompareOp::GreaterEqual, 3));
    plan.add_condition(cmp(0, CompareOp::SmallerEqual, 7));
    assert_eq!(plan.matched_column_count(), 0);
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Integer(3)]);
            assert_eq!(op, SeekOp::GreaterEqual);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
    // the upper bound lives in the end guard
    assert!(plan.end_guard().is_some());
}

#[test]
fn not_null_guard_combines_with_a_later_upper_bound() {
    let mut plan = plan_abc();
    plan.add_condition(Expression::is_not_null(col(0)));
    plan.add_condition(cmp(0, CompareOp::Smaller, 10));
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Null]);
            assert_eq!(op, SeekOp::Greater);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
    // a real lower bound replaces the guard
    let mut plan = plan_abc();
    plan.add_condition(Expression::is_not_null(col(0)));
    plan.add_condition(cmp(0, CompareOp::Greater, 4));
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Integer(4)]);
            assert_eq!(op, SeekOp::Greater);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
}

#[test]
fn unusable_conjuncts_become_residual() {
    let mut plan = plan_abc();
    plan.add_condition(cmp(0, CompareOp::NotEqual, 1));
    // duplicate equality on the same column
    plan.add_condition(cmp(0, CompareOp::Equal, 1));
    plan.add_condition(cmp(0, CompareOp::Equal, 2));
    // column past the usable prefix
    plan.add_condition(cmp(2, CompareOp::Equal, 3));
    assert_eq!(plan.matched_column_count(), 1);
    assert!(plan.residual().is_some());
}

#[test]
fn full_scan_takes_no_bounds() {
    let mut plan = ScanPlan::full_scan(0);
    plan.add_condition(cmp(0, CompareOp::Equal, 1));
    assert!(!plan.is_index_bearing());
    assert!(plan.residual().is_some());
    assert!(matches!(seek_of(&plan), Seek::All));
}

#[test]
fn null_bound_value_matches_nothing() {
    let mut plan = plan_abc();
    plan.add_condition(Expression::compare(
        CompareOp::Equal,
        col(0),
        Expression::literal(SqlValue::Null),
    ));
    assert!(matches!(seek_of(&plan), Seek::Nothing));
}

#[test]
fn reversal_swaps_bound_roles() {
    let mut plan = plan_abc();
    plan.add_condition(cmp(0, CompareOp::Equal, 1));
    plan.add_condition(cmp(1, CompareOp::Smaller, 10));
    plan.reverse_scan_direction().unwrap();
    assert!(plan.reversed());
    // the equality survives as the leading prefix; the former upper bound
    // is now the seek target
    assert_eq!(plan.matched_column_count(), 1);
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Integer(1), SqlValue::Integer(10)]);
            assert_eq!(op, SeekOp::Smaller);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
    assert!(plan.reverse_scan_direction().is_err());
}

#[test]
fn reversed_equality_only_plan_seeks_inclusively() {
    let mut plan = plan_abc();
    plan.add_condition(cmp(0, CompareOp::Equal, 1));
    plan.reverse_scan_direction().unwrap();
    match seek_of(&plan) {
        Seek::Key { values, op } => {
            assert_eq!(values, vec![SqlValue::Integer(1)]);
            assert_eq!(op, SeekOp::SmallerEqual);
        }
        other => panic!("unexpected seek: {:?}", other),
    }
}

#[test]
fn covers_ordering_checks_prefix_and_direction() {
    let mut plan = plan_abc();
    plan.add_condition(cmp(0, CompareOp::Equal, 1));
    assert!(plan.covers_ordering(&[0], false));
    assert!(plan.covers_ordering(&[0, 1], false));
    assert!(!plan.covers_ordering(&[1], false));
    assert!(!plan.covers_ordering(&[0], true));
    assert!(!plan.covers_ordering(&[0, 1, 2, 3], false));
    plan.reverse_scan_direction().unwrap();
    assert!(plan.covers_ordering(&[0], true));
    assert!(!plan.covers_ordering(&[0], false));

    assert!(!ScanPlan::full_scan(0).covers_ordering(&[0], false));
}

#[test]
fn full_predicate_collects_bounds_once() {
    let a_eq = cmp(0, CompareOp::Equal, 1);
    let b_up = cmp(1, CompareOp::Smaller, 10);
    let residual = cmp(2, CompareOp::NotEqual, 5);
    let mut plan = plan_abc();
    plan.add_condition(a_eq.clone());
    plan.add_condition(b_up.clone());
    plan.add_condition(residual.clone());
    // the equality is mirrored into both bound sides but appears once
    let full = plan.full_predicate().unwrap();
    let conjuncts = full.split_conjuncts();
    assert!(conjuncts.contains(&a_eq));
    assert!(conjuncts.contains(&b_up));
    assert!(conjuncts.contains(&residual));
    assert_eq!(conjuncts.iter().filter(|c| **c == a_eq).count(), 1);
}

#[test]
fn with_index_rejects_oversized_keys() {
    let err = ScanPlan::with_index(0, 0, Vec::new()).unwrap_err();
    assert!(matches!(err, ExecutorError::MalformedScanPlan(_)));
    let wide: Vec<usize> = (0..=crate::limits::MAX_INDEX_KEY_COLUMNS).collect();
    let err = ScanPlan::with_index(0, 0, wide).unwrap_err();
    assert!(matches!(err, ExecutorError::MalformedScanPlan(_)));
}
