//! Predicate expression trees
//!
//! The boolean expression tree consumed by scan plans and cursors. A
//! predicate is pure over the rows currently bound in the execution
//! context; column references name a range by its stable join-order
//! position rather than holding a pointer into the descriptor graph, so
//! resolution is an O(1) lookup through the context's row slots.
//!
//! Evaluation follows SQL three-valued logic; at the filter boundary
//! UNKNOWN collapses to false, as in the rest of the engine.

use std::cmp::Ordering;

use wrensql_types::SqlValue;

use crate::context::ExecutionContext;
use crate::errors::ExecutorError;

/// Binary comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Smaller,
    SmallerEqual,
}

impl CompareOp {
    /// The operator with its operands swapped: `a op b` == `b op.flipped() a`
    pub fn flipped(self) -> CompareOp {
        match self {
            CompareOp::Equal => CompareOp::Equal,
            CompareOp::NotEqual => CompareOp::NotEqual,
            CompareOp::Greater => CompareOp::Smaller,
            CompareOp::GreaterEqual => CompareOp::SmallerEqual,
            CompareOp::Smaller => CompareOp::Greater,
            CompareOp::SmallerEqual => CompareOp::GreaterEqual,
        }
    }

    /// Operator symbol for error messages
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Equal => "=",
            CompareOp::NotEqual => "<>",
            CompareOp::Greater => ">",
            CompareOp::GreaterEqual => ">=",
            CompareOp::Smaller => "<",
            CompareOp::SmallerEqual => "<=",
        }
    }
}

/// A boolean or scalar expression over the rows bound in a context
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(SqlValue),
    /// Column of a range, addressed by join-order position and column index
    Column { range: usize, column: usize },
    Compare {
        op: CompareOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    IsNull { operand: Box<Expression>, negated: bool },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
}

impl Expression {
    pub fn literal(value: SqlValue) -> Expression {
        Expression::Literal(value)
    }

    pub fn column(range: usize, column: usize) -> Expression {
        Expression::Column { range, column }
    }

    pub fn compare(op: CompareOp, left: Expression, right: Expression) -> Expression {
        Expression::Compare { op, left: Box::new(left), right: Box::new(right) }
    }

    pub fn is_null(operand: Expression) -> Expression {
        Expression::IsNull { operand: Box::new(operand), negated: false }
    }

    pub fn is_not_null(operand: Expression) -> Expression {
        Expression::IsNull { operand: Box::new(operand), negated: true }
    }

    pub fn and(left: Expression, right: Expression) -> Expression {
        Expression::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expression, right: Expression) -> Expression {
        Expression::Or(Box::new(left), Box::new(right))
    }

    pub fn not(operand: Expression) -> Expression {
        Expression::Not(Box::new(operand))
    }

    /// Fold a list of predicates into a single AND chain
    pub fn conjunction(predicates: Vec<Expression>) -> Option<Expression> {
        predicates.into_iter().reduce(Expression::and)
    }

    /// Fold a list of predicates into a single OR chain
    pub fn disjunction(predicates: Vec<Expression>) -> Option<Expression> {
        predicates.into_iter().reduce(Expression::or)
    }

    /// Split a top-level AND chain into its conjuncts
    pub fn split_conjuncts(self) -> Vec<Expression> {
        match self {
            Expression::And(left, right) => {
                let mut conjuncts = left.split_conjuncts();
                conjuncts.extend(right.split_conjuncts());
                conjuncts
            }
            other => vec![other],
        }
    }

    /// Whether any column reference names the given range
    pub fn references_range(&self, range: usize) -> bool {
        match self {
            Expression::Literal(_) => false,
            Expression::Column { range: r, .. } => *r == range,
            Expression::Compare { left, right, .. } => {
                left.references_range(range) || right.references_range(range)
            }
            Expression::IsNull { operand, .. } => operand.references_range(range),
            Expression::And(left, right) | Expression::Or(left, right) => {
                left.references_range(range) || right.references_range(range)
            }
            Expression::Not(operand) => operand.references_range(range),
        }
    }

    /// Whether any column reference names a range at or after the given
    /// join-order position
    ///
    /// A seek bound for a range may only depend on rows already bound, i.e.
    /// ranges at earlier join positions.
    pub fn references_range_at_or_after(&self, range: usize) -> bool {
        match self {
            Expression::Literal(_) => false,
            Expression::Column { range: r, .. } => *r >= range,
            Expression::Compare { left, right, .. } => {
                left.references_range_at_or_after(range)
                    || right.references_range_at_or_after(range)
            }
            Expression::IsNull { operand, .. } => operand.references_range_at_or_after(range),
            Expression::And(left, right) | Expression::Or(left, right) => {
                left.references_range_at_or_after(range)
                    || right.references_range_at_or_after(range)
            }
            Expression::Not(operand) => operand.references_range_at_or_after(range),
        }
    }

    /// Evaluate to a scalar value
    pub fn eval_value(&self, ctx: &ExecutionContext<'_>) -> Result<SqlValue, ExecutorError> {
        match self {
            Expression::Literal(value) => Ok(value.clone()),
            Expression::Column { range, column } => ctx.column_value(*range, *column),
            Expression::Compare { op, left, right } => {
                let left = left.eval_value(ctx)?;
                let right = right.eval_value(ctx)?;
                if left.is_null() || right.is_null() {
                    return Ok(SqlValue::Null);
                }
                Ok(SqlValue::Boolean(compare_values(*op, &left, &right)?))
            }
            Expression::IsNull { operand, negated } => {
                let value = operand.eval_value(ctx)?;
                Ok(SqlValue::Boolean(value.is_null() != *negated))
            }
            Expression::And(left, right) => {
                // three-valued AND: false dominates, then unknown
                match truth(left.eval_value(ctx)?)? {
                    Some(false) => Ok(SqlValue::Boolean(false)),
                    left_truth => match (left_truth, truth(right.eval_value(ctx)?)?) {
                        (_, Some(false)) => Ok(SqlValue::Boolean(false)),
                        (Some(true), Some(true)) => Ok(SqlValue::Boolean(true)),
                        _ => Ok(SqlValue::Null),
                    },
                }
            }
            Expression::Or(left, right) => {
                // three-valued OR: true dominates, then unknown
                match truth(left.eval_value(ctx)?)? {
                    Some(true) => Ok(SqlValue::Boolean(true)),
                    left_truth => match (left_truth, truth(right.eval_value(ctx)?)?) {
                        (_, Some(true)) => Ok(SqlValue::Boolean(true)),
                        (Some(false), Some(false)) => Ok(SqlValue::Boolean(false)),
                        _ => Ok(SqlValue::Null),
                    },
                }
            }
            Expression::Not(operand) => match truth(operand.eval_value(ctx)?)? {
                Some(b) => Ok(SqlValue::Boolean(!b)),
                None => Ok(SqlValue::Null),
            },
        }
    }

    /// Evaluate as a filter predicate: UNKNOWN collapses to false
    pub fn evaluate(&self, ctx: &ExecutionContext<'_>) -> Result<bool, ExecutorError> {
        Ok(truth(self.eval_value(ctx)?)? == Some(true))
    }

    /// Classify this predicate as a single-column condition on `range`
    ///
    /// Recognizes `column-of-range <op> value` (either operand order) where
    /// the value depends only on earlier join positions — those are bound
    /// when this range evaluates its seek — and `column IS [NOT] NULL`.
    /// Everything else is unusable for scan bounds and classifies as None.
    pub(crate) fn classify_for_range(&self, range: usize) -> Option<RangeCondition<'_>> {
        match self {
            Expression::Compare { op, left, right } => {
                if let Expression::Column { range: r, column } = left.as_ref() {
                    if *r == range && !right.references_range_at_or_after(range) {
                        return Some(RangeCondition::Compare {
                            column: *column,
                            op: *op,
                            value: right,
                        });
                    }
                }
                if let Expression::Column { range: r, column } = right.as_ref() {
                    if *r == range && !left.references_range_at_or_after(range) {
                        return Some(RangeCondition::Compare {
                            column: *column,
                            op: op.flipped(),
                            value: left,
                        });
                    }
                }
                None
            }
            Expression::IsNull { operand, negated } => {
                if let Expression::Column { range: r, column } = operand.as_ref() {
                    if *r == range {
                        return Some(if *negated {
                            RangeCondition::IsNotNull { column: *column }
                        } else {
                            RangeCondition::IsNull { column: *column }
                        });
                    }
                }
                None
            }
            _ => None,
        }
    }
}

/// A predicate classified against one range, normalized column-first
#[derive(Debug)]
pub(crate) enum RangeCondition<'a> {
    Compare { column: usize, op: CompareOp, value: &'a Expression },
    IsNull { column: usize },
    IsNotNull { column: usize },
}

/// Truth value of a scalar under three-valued logic
fn truth(value: SqlValue) -> Result<Option<bool>, ExecutorError> {
    match value {
        SqlValue::Boolean(b) => Ok(Some(b)),
        SqlValue::Null => Ok(None),
        other => Err(ExecutorError::TypeMismatch {
            left: other,
            op: "as boolean".to_string(),
            right: SqlValue::Null,
        }),
    }
}

/// Compare two non-NULL values under SQL ordering
fn compare_values(op: CompareOp, left: &SqlValue, right: &SqlValue) -> Result<bool, ExecutorError> {
    match left.partial_cmp(right) {
        Some(ordering) => Ok(match op {
            CompareOp::Equal => ordering == Ordering::Equal,
            CompareOp::NotEqual => ordering != Ordering::Equal,
            CompareOp::Greater => ordering == Ordering::Greater,
            CompareOp::GreaterEqual => ordering != Ordering::Less,
            CompareOp::Smaller => ordering == Ordering::Less,
            CompareOp::SmallerEqual => ordering != Ordering::Greater,
        }),
        None => Err(ExecutorError::TypeMismatch {
            left: left.clone(),
            op: op.symbol().to_string(),
            right: right.clone(),
        }),
    }
}

#[cfg(test)]
#[path = "expr_tests.rs"]
mod expr_tests;
