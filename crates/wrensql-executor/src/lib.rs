//! Executor - range scan and nested-loop join execution
//!
//! This crate implements the physical operator that scans one FROM-clause
//! table reference: it turns compiled filter predicates into index scan
//! bounds, iterates one or more such ranges to drive nested-loop joins with
//! LEFT/RIGHT/FULL OUTER semantics, and unions multiple disjunctive access
//! paths for a single logical range.
//!
//! Compile-time objects (`RangeDescriptor`, `ScanPlan`) are immutable after
//! construction and may be shared across concurrent executions; all mutable
//! state lives on the per-execution cursors (`RangeCursor`, `JoinCursor`)
//! and the `ExecutionContext` threaded through every `next()` call.

mod context;
mod cursor;
pub mod errors;
pub mod expr;
mod join;
pub mod limits;
mod plan;
mod range;

pub use context::ExecutionContext;
pub use cursor::RangeCursor;
pub use errors::ExecutorError;
pub use expr::{CompareOp, Expression};
pub use join::JoinCursor;
pub use plan::{BoundOp, ScanPlan};
pub use range::RangeDescriptor;
