//! Range cursors
//!
//! A `RangeCursor` iterates the rows of one range. All mutable scan state
//! lives here, so the descriptor and its plans can be shared across
//! concurrent executions. The cursor walks its range's scan plans in order
//! (one plan per disjunct of the access predicate), opening each plan's
//! storage cursor at the seek position computed against the rows currently
//! bound for outer ranges.
//!
//! A row survives a `next()` call only after the full check chain passes:
//! the terminal predicate (stops the whole range), the end guard (stops the
//! current plan), the plan residual, the WHERE-side residual of outer
//! ranges, and the exclude predicate of later disjuncts. For LEFT and FULL
//! OUTER ranges an exhausted pass that produced no real row yields exactly
//! one all-null padded row; for RIGHT and FULL OUTER ranges the cursor can
//! switch into an anti-join pass that replays the WHERE-side plans and
//! yields rows never matched during the normal passes.

use std::collections::HashSet;

use wrensql_storage::{Row, RowId, ScanCursor, Table};

use crate::context::ExecutionContext;
use crate::errors::ExecutorError;
use crate::plan::{ScanPlan, Seek};
use crate::range::RangeDescriptor;

/// Which side of the range's plans the cursor is replaying
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Normal scan over the join-side plans
    Forward,
    /// Second pass over the WHERE-side plans yielding unmatched rows
    AntiJoin,
}

/// Per-execution iterator over one range's rows
pub struct RangeCursor<'a> {
    range: &'a RangeDescriptor,
    table: &'a Table,
    pass: Pass,
    plan_index: usize,
    store: Option<ScanCursor<'a>>,
    /// Whether the current pass produced at least one real row
    produced_real: bool,
    /// Whether the current pass already yielded its padded row
    outer_padded: bool,
    /// Row identities produced by any normal pass; feeds the anti-join pass
    matched: HashSet<RowId>,
    current_row_id: Option<RowId>,
}

impl<'a> RangeCursor<'a> {
    /// Create a cursor for a range, positioned before the first row
    pub fn new(
        range: &'a RangeDescriptor,
        ctx: &ExecutionContext<'a>,
    ) -> Result<Self, ExecutorError> {
        let table = ctx.database().table(range.table())?;
        Ok(RangeCursor {
            range,
            table,
            pass: Pass::Forward,
            plan_index: 0,
            store: None,
            produced_real: false,
            outer_padded: false,
            matched: HashSet::new(),
            current_row_id: None,
        })
    }

    /// The descriptor this cursor iterates
    pub fn range(&self) -> &'a RangeDescriptor {
        self.range
    }

    /// Identity of the current real row; None before first, after last, and
    /// on the padded row
    pub fn current_row_id(&self) -> Option<RowId> {
        self.current_row_id
    }

    /// Advance to the next surviving row, binding it into the context
    ///
    /// Returns false when the pass is exhausted; the range's row slot is
    /// then unbound. Checks the abort flags on every call.
    pub fn next(&mut self, ctx: &mut ExecutionContext<'a>) -> Result<bool, ExecutorError> {
        match self.pass {
            Pass::Forward => self.next_forward(ctx),
            Pass::AntiJoin => self.next_anti_join(ctx),
        }
    }

    /// Rewind for the next pass over the same plans
    ///
    /// Matched row identities survive a reset: the anti-join pass runs once
    /// over everything every normal pass matched.
    pub fn reset(&mut self, ctx: &mut ExecutionContext<'a>) {
        if let Some(store) = self.store.as_mut() {
            store.release();
        }
        self.store = None;
        self.plan_index = 0;
        self.produced_real = false;
        self.outer_padded = false;
        self.current_row_id = None;
        ctx.bind_row(self.range.position(), None);
    }

    /// Switch the cursor into its anti-join pass over the WHERE-side plans
    pub fn begin_anti_join(&mut self, ctx: &mut ExecutionContext<'a>) {
        self.reset(ctx);
        self.pass = Pass::AntiJoin;
    }

    fn next_forward(&mut self, ctx: &mut ExecutionContext<'a>) -> Result<bool, ExecutorError> {
        let range = self.range;
        let plans = range.scan_plans();
        loop {
            ctx.check_aborted()?;
            if self.plan_index >= plans.len() {
                return self.finish_pass(ctx);
            }
            let plan = &plans[self.plan_index];
            if self.store.is_none() {
                let cursor = self.open_plan(plan, ctx)?;
                self.store = Some(cursor);
            }
            let row_id = self.store.as_mut().and_then(|store| {
                if store.advance() {
                    store.current_row_id()
                } else {
                    None
                }
            });
            let Some(row_id) = row_id else {
                self.store = None;
                self.plan_index += 1;
                continue;
            };
            let row = self.table.row(row_id)?.clone();
            ctx.bind_row(range.position(), Some(row));

            if let Some(terminal) = plan.terminal() {
                if !terminal.evaluate(ctx)? {
                    self.store = None;
                    self.plan_index = plans.len();
                    continue;
                }
            }
            if let Some(guard) = plan.end_guard() {
                if !guard.evaluate(ctx)? {
                    self.store = None;
                    self.plan_index += 1;
                    continue;
                }
            }
            if let Some(residual) = plan.residual() {
                if !residual.evaluate(ctx)? {
                    continue;
                }
            }
            if let Some(residual) = range.where_residual() {
                if !residual.evaluate(ctx)? {
                    continue;
                }
            }
            if let Some(exclude) = plan.exclude() {
                if exclude.evaluate(ctx)? {
                    continue;
                }
            }

            self.produced_real = true;
            self.current_row_id = Some(row_id);
            if range.is_right_join() {
                self.matched.insert(row_id);
            }
            return Ok(true);
        }
    }

    fn next_anti_join(&mut self, ctx: &mut ExecutionContext<'a>) -> Result<bool, ExecutorError> {
        let range = self.range;
        let plans = range.where_plans();
        loop {
            ctx.check_aborted()?;
            if self.plan_index >= plans.len() {
                self.current_row_id = None;
                ctx.bind_row(range.position(), None);
                return Ok(false);
            }
            let plan = &plans[self.plan_index];
            if self.store.is_none() {
                let cursor = self.open_plan(plan, ctx)?;
                self.store = Some(cursor);
            }
            let row_id = self.store.as_mut().and_then(|store| {
                if store.advance() {
                    store.current_row_id()
                } else {
                    None
                }
            });
            let Some(row_id) = row_id else {
                self.store = None;
                self.plan_index += 1;
                continue;
            };
            if self.matched.contains(&row_id) {
                continue;
            }
            let row = self.table.row(row_id)?.clone();
            ctx.bind_row(range.position(), Some(row));

            if let Some(guard) = plan.end_guard() {
                if !guard.evaluate(ctx)? {
                    self.store = None;
                    self.plan_index += 1;
                    continue;
                }
            }
            if let Some(residual) = plan.residual() {
                if !residual.evaluate(ctx)? {
                    continue;
                }
            }

            self.current_row_id = Some(row_id);
            return Ok(true);
        }
    }

    /// Finish the normal pass, padding once for LEFT and FULL OUTER ranges
    ///
    /// The padded row is subject to the WHERE-side residual like any other:
    /// a comparison over it is UNKNOWN, so only NULL-accepting conditions
    /// let the pad through.
    fn finish_pass(&mut self, ctx: &mut ExecutionContext<'a>) -> Result<bool, ExecutorError> {
        if self.range.is_left_join() && !self.produced_real && !self.outer_padded {
            self.outer_padded = true;
            self.current_row_id = None;
            ctx.bind_row(
                self.range.position(),
                Some(Row::nulls(self.range.column_count())),
            );
            let survives = match self.range.where_residual() {
                Some(residual) => residual.evaluate(ctx)?,
                None => true,
            };
            if survives {
                return Ok(true);
            }
        }
        self.current_row_id = None;
        ctx.bind_row(self.range.position(), None);
        Ok(false)
    }

    /// Open the storage cursor for a plan at its seek position
    ///
    /// The seek computes a start position only; termination past the
    /// interesting region is handled by the plan's end guard.
    fn open_plan(
        &self,
        plan: &ScanPlan,
        ctx: &ExecutionContext<'a>,
    ) -> Result<ScanCursor<'a>, ExecutorError> {
        let Some(index_number) = plan.index() else {
            return Ok(self.table.open_full_scan(plan.reversed()));
        };
        let index = self.table.index(index_number).ok_or_else(|| {
            ExecutorError::IndexNotFound(format!("#{} on {}", index_number, self.range.table()))
        })?;
        match plan.seek(ctx)? {
            Seek::All => Ok(index.open_full_scan(plan.reversed())),
            Seek::Nothing => Ok(ScanCursor::empty()),
            Seek::Key { values, op } => {
                if plan.reversed() {
                    Ok(index.open_backward(&values, op))
                } else {
                    Ok(index.open_forward(&values, op))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod cursor_tests;
