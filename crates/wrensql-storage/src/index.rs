//! Ordered multi-column indexes
//!
//! An `OrderedIndex` keeps `(key, row id)` entries sorted by the total
//! ordering of `SqlValue::index_cmp` applied column by column, NULLs first.
//! Scans open at a position computed from a partial key - the leading
//! `key.len()` index columns - and a seek operator; termination past the
//! interesting region is the caller's job (value-level end guards), so an
//! open only ever computes a start position and a direction.

use std::cmp::Ordering;

use wrensql_catalog::IndexMetadata;
use wrensql_types::SqlValue;

use crate::cursor::ScanCursor;
use crate::row::RowId;

/// One sorted index entry: extracted key columns plus owning row identity
pub(crate) type IndexEntry = (Vec<SqlValue>, RowId);

/// Seek operator for positioning a scan relative to a partial key
///
/// `Greater`/`GreaterEqual` position forward scans, `Smaller`/`SmallerEqual`
/// position backward scans. Equality and IS NULL seeks map to the inclusive
/// operator for the scan direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOp {
    Greater,
    GreaterEqual,
    Smaller,
    SmallerEqual,
}

/// A sorted multi-column index over one table's rows
#[derive(Debug)]
pub struct OrderedIndex {
    metadata: IndexMetadata,
    /// Positions of the indexed columns within the table schema
    columns: Vec<usize>,
    entries: Vec<IndexEntry>,
}

impl OrderedIndex {
    pub(crate) fn new(metadata: IndexMetadata, columns: Vec<usize>) -> Self {
        OrderedIndex { metadata, columns, entries: Vec::new() }
    }

    /// Index name from the catalog metadata
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Positions of the sort columns within the table schema, leading first
    pub fn sort_columns(&self) -> &[usize] {
        &self.columns
    }

    /// Number of columns covered by the index
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn insert(&mut self, key: Vec<SqlValue>, row_id: RowId) {
        let position = self
            .entries
            .partition_point(|entry| compare_entries(entry, &key, row_id) == Ordering::Less);
        self.entries.insert(position, (key, row_id));
    }

    /// Open an ascending scan starting at the seek position for `key`
    ///
    /// The key covers the leading `key.len()` index columns. The scan runs
    /// to the end of the index; the caller terminates it early through its
    /// end-guard predicates.
    pub fn open_forward(&self, key: &[SqlValue], op: SeekOp) -> ScanCursor<'_> {
        debug_assert!(key.len() <= self.columns.len());
        let lo = match op {
            SeekOp::GreaterEqual => self.first_not_less(key),
            SeekOp::Greater => self.first_greater(key),
            // A backward-flavored seek on a forward scan starts at the front
            SeekOp::Smaller | SeekOp::SmallerEqual => 0,
        };
        ScanCursor::over_entries(&self.entries, lo, self.entries.len(), false)
    }

    /// Open a descending scan starting at the seek position for `key`
    ///
    /// An out-of-range high bound positions past the last entry, which
    /// degrades to an open-ended descending scan.
    pub fn open_backward(&self, key: &[SqlValue], op: SeekOp) -> ScanCursor<'_> {
        debug_assert!(key.len() <= self.columns.len());
        let hi = match op {
            SeekOp::SmallerEqual => self.first_greater(key),
            SeekOp::Smaller => self.first_not_less(key),
            // A forward-flavored seek on a backward scan starts at the top
            SeekOp::Greater | SeekOp::GreaterEqual => self.entries.len(),
        };
        ScanCursor::over_entries(&self.entries, 0, hi, true)
    }

    /// Open a scan over every entry, in index order or reversed
    pub fn open_full_scan(&self, reversed: bool) -> ScanCursor<'_> {
        ScanCursor::over_entries(&self.entries, 0, self.entries.len(), reversed)
    }

    /// First position whose leading columns compare >= `key`
    fn first_not_less(&self, key: &[SqlValue]) -> usize {
        self.entries.partition_point(|entry| compare_prefix(&entry.0, key) == Ordering::Less)
    }

    /// First position whose leading columns compare > `key`
    fn first_greater(&self, key: &[SqlValue]) -> usize {
        self.entries.partition_point(|entry| compare_prefix(&entry.0, key) != Ordering::Greater)
    }
}

/// Compare an entry key against a partial seek key on its leading columns
fn compare_prefix(entry_key: &[SqlValue], key: &[SqlValue]) -> Ordering {
    for (entry_value, key_value) in entry_key.iter().zip(key.iter()) {
        match entry_value.index_cmp(key_value) {
            Ordering::Equal => continue,
            ordering => return ordering,
        }
    }
    Ordering::Equal
}

/// Full ordering for insertion: all key columns, then row identity
fn compare_entries(entry: &IndexEntry, key: &[SqlValue], row_id: RowId) -> Ordering {
    match compare_prefix(&entry.0, key) {
        Ordering::Equal => entry.1.cmp(&row_id),
        ordering => ordering,
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod index_tests;
