//! Nested-loop join execution
//!
//! A `JoinCursor` composes the range cursors of a join in join order into a
//! left-deep nested loop. Advancement is depth-driven: a successful inner
//! `next()` descends and reopens the next cursor against the newly bound
//! outer rows, an exhausted cursor backtracks and advances its outer
//! neighbor. Joined tuples surface through the context's row slots; the
//! cursor itself never materializes intermediate results.
//!
//! After the main loop exhausts, every RIGHT and FULL OUTER range gets one
//! anti-join pass, in join order: its WHERE-side plans are replayed and the
//! rows never matched during the main loop come out with every other range
//! padded to all-null.

use wrensql_storage::Row;
use wrensql_types::SqlValue;

use crate::context::ExecutionContext;
use crate::cursor::RangeCursor;
use crate::errors::ExecutorError;
use crate::limits::MAX_JOIN_DEPTH;
use crate::range::RangeDescriptor;

/// Where the cursor is in the overall two-stage iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    BeforeFirst,
    Main,
    /// Anti-join pass for the right/full outer range at this position
    Anti(usize),
    Done,
}

/// Left-deep nested-loop cursor over a sequence of ranges
pub struct JoinCursor<'a> {
    ranges: &'a [RangeDescriptor],
    cursors: Vec<RangeCursor<'a>>,
    /// Position of the cursor currently being advanced
    depth: usize,
    phase: Phase,
}

impl<'a> JoinCursor<'a> {
    /// Compose the ranges into a join cursor, positioned before the first
    /// tuple
    ///
    /// Ranges must appear in join order with `position()` equal to their
    /// slot, and the context must carry one row slot per range.
    pub fn new(
        ranges: &'a [RangeDescriptor],
        ctx: &ExecutionContext<'a>,
    ) -> Result<Self, ExecutorError> {
        if ranges.is_empty() {
            return Err(ExecutorError::MalformedScanPlan(
                "join requires at least one range".to_string(),
            ));
        }
        if ranges.len() > MAX_JOIN_DEPTH {
            return Err(ExecutorError::MalformedScanPlan(format!(
                "join composes {} ranges, limit is {}",
                ranges.len(),
                MAX_JOIN_DEPTH
            )));
        }
        if ctx.range_count() != ranges.len() {
            return Err(ExecutorError::MalformedScanPlan(format!(
                "context has {} row slots for {} ranges",
                ctx.range_count(),
                ranges.len()
            )));
        }
        let mut cursors = Vec::with_capacity(ranges.len());
        for (slot, range) in ranges.iter().enumerate() {
            if range.position() != slot {
                return Err(ExecutorError::MalformedScanPlan(format!(
                    "range for slot {} carries position {}",
                    slot,
                    range.position()
                )));
            }
            range.validate()?;
            cursors.push(RangeCursor::new(range, ctx)?);
        }
        Ok(JoinCursor { ranges, cursors, depth: 0, phase: Phase::BeforeFirst })
    }

    /// Number of ranges composed into this join
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Advance to the next joined tuple, binding its rows into the context
    ///
    /// Checks the abort flags on every call, including after exhaustion.
    pub fn next(&mut self, ctx: &mut ExecutionContext<'a>) -> Result<bool, ExecutorError> {
        ctx.check_aborted()?;
        match self.phase {
            Phase::BeforeFirst => {
                self.phase = Phase::Main;
                self.depth = 0;
                self.next_main(ctx)
            }
            Phase::Main => self.next_main(ctx),
            Phase::Anti(position) => self.next_anti(ctx, position),
            Phase::Done => Ok(false),
        }
    }

    fn next_main(&mut self, ctx: &mut ExecutionContext<'a>) -> Result<bool, ExecutorError> {
        let last = self.cursors.len() - 1;
        loop {
            if self.cursors[self.depth].next(ctx)? {
                if self.depth == last {
                    return Ok(true);
                }
                // new outer row: the next cursor starts a fresh pass
                self.depth += 1;
                self.cursors[self.depth].reset(ctx);
            } else if self.depth == 0 {
                return self.enter_anti_phase(ctx, 0);
            } else {
                self.depth -= 1;
            }
        }
    }

    /// Start the anti-join pass of the first right/full outer range at or
    /// after `from`, or finish
    fn enter_anti_phase(
        &mut self,
        ctx: &mut ExecutionContext<'a>,
        from: usize,
    ) -> Result<bool, ExecutorError> {
        let Some(position) = (from..self.ranges.len()).find(|&p| self.ranges[p].is_right_join())
        else {
            self.phase = Phase::Done;
            for slot in 0..self.ranges.len() {
                ctx.bind_row(slot, None);
            }
            return Ok(false);
        };
        self.phase = Phase::Anti(position);
        self.cursors[position].begin_anti_join(ctx);
        // every other range is all-null for the whole pass
        for (slot, range) in self.ranges.iter().enumerate() {
            if slot != position {
                ctx.bind_row(slot, Some(Row::nulls(range.column_count())));
            }
        }
        self.next_anti(ctx, position)
    }

    fn next_anti(
        &mut self,
        ctx: &mut ExecutionContext<'a>,
        position: usize,
    ) -> Result<bool, ExecutorError> {
        if self.cursors[position].next(ctx)? {
            return Ok(true);
        }
        self.enter_anti_phase(ctx, position + 1)
    }

    /// Current tuple as the concatenated column values of every range
    pub fn current_tuple(&self, ctx: &ExecutionContext<'a>) -> Result<Vec<SqlValue>, ExecutorError> {
        let mut values = Vec::new();
        for slot in 0..self.ranges.len() {
            let row = ctx
                .current_row(slot)
                .ok_or(ExecutorError::RangeNotBound { range: slot })?;
            values.extend(row.values.iter().cloned());
        }
        Ok(values)
    }

    /// Drain the cursor, materializing every tuple
    pub fn fetch_all(
        &mut self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<Vec<Vec<SqlValue>>, ExecutorError> {
        let mut tuples = Vec::new();
        while self.next(ctx)? {
            tuples.push(self.current_tuple(ctx)?);
        }
        Ok(tuples)
    }
}
