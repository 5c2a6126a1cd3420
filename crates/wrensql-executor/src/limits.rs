//! Execution limits and safeguards
//!
//! Limits that catch malformed compiled plans before they turn into stack
//! or memory problems at execution time. Values are conservative; a
//! legitimate compiled query never approaches them.

/// Maximum number of ranges composed into one join cursor
///
/// A left-deep nested-loop join holds one open storage cursor per range, so
/// this also bounds the number of simultaneously open cursors.
pub const MAX_JOIN_DEPTH: usize = 64;

/// Maximum number of leading index columns usable as scan bound terms
pub const MAX_INDEX_KEY_COLUMNS: usize = 16;
