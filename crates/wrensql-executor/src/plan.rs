//! Scan plans
//!
//! A `ScanPlan` describes one indexed-or-full-scan strategy for one range
//! and one disjunct of its access predicate: the chosen index, ordered
//! bound terms per leading index column, the residual predicate, and the
//! terminal/end-guard/exclude predicates. Plans are built once at compile
//! time, are immutable afterwards, and are shared across executions.
//!
//! Bound construction: conjuncts arrive in any order through
//! `add_condition`. Equality and IS NULL conditions extend the matched
//! leading-column prefix; a single range condition (`>`, `>=`, `<`, `<=`)
//! may attach to the next unbound column and freezes the prefix; an
//! IS NOT NULL guard attaches with operator `Not` and lets a later upper
//! bound on the same column combine. Anything else is residual.
//!
//! The end guard mirrors the equality prefix and the upper-bound terms so
//! the scan can terminate itself mid-index even for operators the index
//! cannot express exactly; `Not` never seeks beyond skipping the NULL
//! group at the front of its column.

use wrensql_storage::SeekOp;
use wrensql_types::SqlValue;

use crate::context::ExecutionContext;
use crate::errors::ExecutorError;
use crate::expr::{CompareOp, Expression, RangeCondition};
use crate::limits::MAX_INDEX_KEY_COLUMNS;

/// Operator class of a bound term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundOp {
    Equal,
    IsNull,
    Greater,
    GreaterEqual,
    Smaller,
    SmallerEqual,
    /// IS NOT NULL guard: no seek value, skips the NULL group of its column
    Not,
}

impl BoundOp {
    fn is_equality(self) -> bool {
        matches!(self, BoundOp::Equal | BoundOp::IsNull)
    }
}

/// One single-column comparison contributing to a scan's start or end key
#[derive(Debug, Clone)]
struct BoundTerm {
    /// The original predicate; evaluated as part of guards and excludes
    predicate: Expression,
    /// Value expression producing the key column; None for IS NULL / NOT
    value: Option<Expression>,
    op: BoundOp,
}

/// How to open the underlying index for one plan, for one outer context
#[derive(Debug)]
pub(crate) enum Seek {
    /// No usable bound: scan the whole index
    All,
    /// A bound evaluated to NULL under a non-IS-NULL operator: no row can match
    Nothing,
    /// Seek to `values` over the leading columns with the given operator
    Key { values: Vec<SqlValue>, op: SeekOp },
}

/// One indexed-or-full-scan strategy for one disjunct of a range's predicate
#[derive(Debug, Clone)]
pub struct ScanPlan {
    range: usize,
    index: Option<usize>,
    /// Table column positions of the index's sort columns, leading first
    index_columns: Vec<usize>,
    start: Vec<Option<BoundTerm>>,
    end: Vec<Option<BoundTerm>>,
    matched_column_count: usize,
    /// Set once a range or NOT bound attaches: no further equality extension
    prefix_frozen: bool,
    residual: Option<Expression>,
    terminal: Option<Expression>,
    end_guard: Option<Expression>,
    exclude: Option<Expression>,
    reversed: bool,
}

impl ScanPlan {
    /// A plan that scans the range's table in row order, no index
    pub fn full_scan(range: usize) -> Self {
        ScanPlan {
            range,
            index: None,
            index_columns: Vec::new(),
            start: Vec::new(),
            end: Vec::new(),
            matched_column_count: 0,
            prefix_frozen: false,
            residual: None,
            terminal: None,
            end_guard: None,
            exclude: None,
            reversed: false,
        }
    }

    /// A plan over the given index of the range's table
    ///
    /// `index_columns` are the table column positions of the index's sort
    /// columns, leading column first.
    pub fn with_index(
        range: usize,
        index_number: usize,
        index_columns: Vec<usize>,
    ) -> Result<Self, ExecutorError> {
        if index_columns.is_empty() {
            return Err(ExecutorError::MalformedScanPlan(
                "index plan requires at least one sort column".to_string(),
            ));
        }
        if index_columns.len() > MAX_INDEX_KEY_COLUMNS {
            return Err(ExecutorError::MalformedScanPlan(format!(
                "index covers {} columns, limit is {}",
                index_columns.len(),
                MAX_INDEX_KEY_COLUMNS
            )));
        }
        let width = index_columns.len();
        Ok(ScanPlan {
            range,
            index: Some(index_number),
            index_columns,
            start: vec![None; width],
            end: vec![None; width],
            matched_column_count: 0,
            prefix_frozen: false,
            residual: None,
            terminal: None,
            end_guard: None,
            exclude: None,
            reversed: false,
        })
    }

    /// Join-order position of the owning range
    pub fn range(&self) -> usize {
        self.range
    }

    /// Number of the chosen index within the range's table, if any
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Length of the equality-matched leading column prefix
    pub fn matched_column_count(&self) -> usize {
        self.matched_column_count
    }

    pub fn reversed(&self) -> bool {
        self.reversed
    }

    pub fn residual(&self) -> Option<&Expression> {
        self.residual.as_ref()
    }

    pub fn terminal(&self) -> Option<&Expression> {
        self.terminal.as_ref()
    }

    pub(crate) fn end_guard(&self) -> Option<&Expression> {
        self.end_guard.as_ref()
    }

    pub(crate) fn exclude(&self) -> Option<&Expression> {
        self.exclude.as_ref()
    }

    /// Whether any bound term or residual has been attached
    pub fn has_conditions(&self) -> bool {
        self.residual.is_some()
            || self.start.iter().any(Option::is_some)
            || self.end.iter().any(Option::is_some)
    }

    /// Whether this plan drives an index seek rather than a full scan
    pub fn is_index_bearing(&self) -> bool {
        self.index.is_some() && self.start.iter().chain(self.end.iter()).any(Option::is_some)
    }

    /// Predicate that stops the whole range once false
    pub fn set_terminal(&mut self, predicate: Expression) {
        self.terminal = Some(match self.terminal.take() {
            Some(existing) => Expression::and(existing, predicate),
            None => predicate,
        });
    }

    /// Predicate suppressing rows already produced by an earlier disjunct
    pub(crate) fn set_exclude(&mut self, predicate: Expression) {
        self.exclude = Some(predicate);
    }

    /// Classify one conjunct of the range's predicate into this plan
    pub fn add_condition(&mut self, predicate: Expression) {
        let action = self.classify(&predicate);
        match action {
            Attach::Residual => self.add_residual(predicate),
            Attach::Equality { value, op } => {
                let term = BoundTerm { predicate, value, op };
                // equality terms mirror into the end side so the end guard
                // stops the scan once the prefix no longer matches
                self.start[self.matched_column_count] = Some(term.clone());
                self.end[self.matched_column_count] = Some(term);
                self.matched_column_count += 1;
                self.rebuild_end_guard();
            }
            Attach::Lower { value, op } => {
                let slot = self.matched_column_count;
                self.start[slot] = Some(BoundTerm { predicate, value: Some(value), op });
                self.prefix_frozen = true;
            }
            Attach::Upper { value, op } => {
                let slot = self.matched_column_count;
                if self.start[slot].is_none() {
                    // NULLs sort first: without a lower bound the seek must
                    // still skip the NULL group, or the end guard would stop
                    // the scan before any row in range
                    let column = self.index_columns[slot];
                    self.start[slot] = Some(BoundTerm {
                        predicate: Expression::is_not_null(Expression::column(self.range, column)),
                        value: None,
                        op: BoundOp::Not,
                    });
                }
                self.end[slot] = Some(BoundTerm { predicate, value: Some(value), op });
                self.prefix_frozen = true;
                self.rebuild_end_guard();
            }
            Attach::NotNull => {
                let slot = self.matched_column_count;
                self.start[slot] = Some(BoundTerm { predicate, value: None, op: BoundOp::Not });
                self.prefix_frozen = true;
            }
        }
    }

    fn classify(&self, predicate: &Expression) -> Attach {
        if self.index.is_none() {
            return Attach::Residual;
        }
        let next_slot = self.matched_column_count;
        let Some(condition) = predicate.classify_for_range(self.range) else {
            return Attach::Residual;
        };
        match condition {
            RangeCondition::Compare { column, op, value } => match op {
                CompareOp::Equal => {
                    if !self.prefix_frozen
                        && self.next_column_is(next_slot, column)
                        && self.start[next_slot].is_none()
                    {
                        Attach::Equality { value: Some(value.clone()), op: BoundOp::Equal }
                    } else {
                        // duplicate equality on a bound column, or a column
                        // past the usable prefix
                        Attach::Residual
                    }
                }
                CompareOp::Greater | CompareOp::GreaterEqual => {
                    let replaceable = match self.start.get(next_slot) {
                        Some(Some(term)) => term.op == BoundOp::Not,
                        Some(None) => true,
                        None => false,
                    };
                    if self.next_column_is(next_slot, column) && replaceable {
                        let op = if op == CompareOp::Greater {
                            BoundOp::Greater
                        } else {
                            BoundOp::GreaterEqual
                        };
                        Attach::Lower { value: value.clone(), op }
                    } else {
                        Attach::Residual
                    }
                }
                CompareOp::Smaller | CompareOp::SmallerEqual => {
                    if self.next_column_is(next_slot, column)
                        && self.end.get(next_slot).is_some_and(|t| t.is_none())
                    {
                        let op = if op == CompareOp::Smaller {
                            BoundOp::Smaller
                        } else {
                            BoundOp::SmallerEqual
                        };
                        Attach::Upper { value: value.clone(), op }
                    } else {
                        Attach::Residual
                    }
                }
                CompareOp::NotEqual => Attach::Residual,
            },
            RangeCondition::IsNull { column } => {
                if !self.prefix_frozen
                    && self.next_column_is(next_slot, column)
                    && self.start[next_slot].is_none()
                {
                    Attach::Equality { value: None, op: BoundOp::IsNull }
                } else {
                    Attach::Residual
                }
            }
            RangeCondition::IsNotNull { column } => {
                if self.next_column_is(next_slot, column)
                    && self.start.get(next_slot).is_some_and(|t| t.is_none())
                {
                    Attach::NotNull
                } else {
                    Attach::Residual
                }
            }
        }
    }

    fn next_column_is(&self, slot: usize, column: usize) -> bool {
        self.index_columns.get(slot) == Some(&column)
    }

    fn add_residual(&mut self, predicate: Expression) {
        self.residual = Some(match self.residual.take() {
            Some(existing) => Expression::and(existing, predicate),
            None => predicate,
        });
    }

    fn rebuild_end_guard(&mut self) {
        let predicates: Vec<Expression> =
            self.end.iter().flatten().map(|term| term.predicate.clone()).collect();
        self.end_guard = Expression::conjunction(predicates);
    }

    /// Swap the roles of start and end terms so the scan runs backward
    ///
    /// Legal only before first use; used solely to satisfy an ORDER BY on
    /// the index columns without a sort step. A term whose operator cannot
    /// seek (`Not`) moves to the guard side and never becomes a key column.
    pub fn reverse_scan_direction(&mut self) -> Result<(), ExecutorError> {
        if self.reversed {
            return Err(ExecutorError::MalformedScanPlan(
                "scan direction already reversed".to_string(),
            ));
        }
        if self.index.is_none() {
            self.reversed = true;
            return Ok(());
        }
        std::mem::swap(&mut self.start, &mut self.end);
        self.reversed = true;
        // the former end side may hold fewer usable leading terms; recompute
        // the equality prefix the seek may rely on
        self.matched_column_count = self
            .start
            .iter()
            .take_while(|term| term.as_ref().is_some_and(|t| t.op.is_equality()))
            .count();
        self.rebuild_end_guard();
        Ok(())
    }

    /// Whether this plan delivers rows ordered on the given table columns
    ///
    /// True when the columns are a leading prefix of the chosen index and
    /// the requested direction matches the scan direction; used to elide a
    /// sort step.
    pub fn covers_ordering(&self, columns: &[usize], descending: bool) -> bool {
        self.index.is_some()
            && columns.len() <= self.index_columns.len()
            && columns == &self.index_columns[..columns.len()]
            && descending == self.reversed
    }

    /// Conjunction of everything rows produced by this plan satisfy
    ///
    /// Used to build exclude predicates for later disjuncts of the same
    /// range.
    pub(crate) fn full_predicate(&self) -> Option<Expression> {
        let mut predicates: Vec<Expression> =
            self.start.iter().flatten().map(|term| term.predicate.clone()).collect();
        // equality terms are mirrored on the end side; only take the rest
        predicates.extend(
            self.end
                .iter()
                .flatten()
                .filter(|term| !term.op.is_equality())
                .map(|term| term.predicate.clone()),
        );
        if let Some(residual) = &self.residual {
            predicates.push(residual.clone());
        }
        Expression::conjunction(predicates)
    }

    /// Compute the concrete seek for this plan against the current context
    ///
    /// Bound values are evaluated against the rows bound for outer ranges.
    /// A NULL value under a non-IS-NULL operator means no row can match
    /// (SQL null-comparison semantics); a `Not` term seeks past the NULL
    /// group of its column and ends the key.
    pub(crate) fn seek(&self, ctx: &ExecutionContext<'_>) -> Result<Seek, ExecutorError> {
        let mut values = Vec::new();
        let mut seek_op = None;
        for term in &self.start {
            let Some(term) = term else { break };
            match term.op {
                BoundOp::IsNull => {
                    values.push(SqlValue::Null);
                    seek_op = Some(self.inclusive_op());
                }
                BoundOp::Not => {
                    values.push(SqlValue::Null);
                    seek_op = Some(SeekOp::Greater);
                    break;
                }
                BoundOp::Equal => {
                    let value = self.bound_value(term, ctx)?;
                    let Some(value) = value else { return Ok(Seek::Nothing) };
                    values.push(value);
                    seek_op = Some(self.inclusive_op());
                }
                BoundOp::Greater | BoundOp::GreaterEqual | BoundOp::Smaller
                | BoundOp::SmallerEqual => {
                    let value = self.bound_value(term, ctx)?;
                    let Some(value) = value else { return Ok(Seek::Nothing) };
                    values.push(value);
                    seek_op = Some(match term.op {
                        BoundOp::Greater => SeekOp::Greater,
                        BoundOp::GreaterEqual => SeekOp::GreaterEqual,
                        BoundOp::Smaller => SeekOp::Smaller,
                        BoundOp::SmallerEqual => SeekOp::SmallerEqual,
                        _ => unreachable!(),
                    });
                    // a range bound is always the last key column
                    break;
                }
            }
        }
        match seek_op {
            Some(op) if !values.is_empty() => Ok(Seek::Key { values, op }),
            _ => Ok(Seek::All),
        }
    }

    fn inclusive_op(&self) -> SeekOp {
        if self.reversed {
            SeekOp::SmallerEqual
        } else {
            SeekOp::GreaterEqual
        }
    }

    /// Evaluate a term's bound value; None means NULL under a comparison
    fn bound_value(
        &self,
        term: &BoundTerm,
        ctx: &ExecutionContext<'_>,
    ) -> Result<Option<SqlValue>, ExecutorError> {
        let value = match &term.value {
            Some(expression) => expression.eval_value(ctx)?,
            None => SqlValue::Null,
        };
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(value))
    }
}

/// Classification outcome for one conjunct
enum Attach {
    Residual,
    Equality { value: Option<Expression>, op: BoundOp },
    Lower { value: Expression, op: BoundOp },
    Upper { value: Expression, op: BoundOp },
    NotNull,
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod plan_tests;
