//! Scan cursors over tables and ordered indexes
//!
//! A `ScanCursor` is the narrow contract the executor consumes: it walks a
//! pre-positioned window of row identities in one direction. The cursor is
//! exclusively owned by the range iterator that opened it until
//! `release()`; it is never shared.

use crate::index::IndexEntry;
use crate::row::RowId;

/// Cursor over a window of row identities, in index order or row order
#[derive(Debug)]
pub struct ScanCursor<'a> {
    backing: Backing<'a>,
    /// Window of positions visited, half-open
    lo: usize,
    hi: usize,
    /// Next position for an ascending scan, previous-plus-one for descending
    next: usize,
    descending: bool,
    current: Option<RowId>,
}

#[derive(Debug)]
enum Backing<'a> {
    /// Positions index into a sorted entry slice
    Index(&'a [IndexEntry]),
    /// Positions are row identities themselves (default row-order scan)
    RowOrder,
}

impl<'a> ScanCursor<'a> {
    pub(crate) fn over_entries(entries: &'a [IndexEntry], lo: usize, hi: usize, descending: bool) -> Self {
        let next = if descending { hi } else { lo };
        ScanCursor { backing: Backing::Index(entries), lo, hi, next, descending, current: None }
    }

    pub(crate) fn over_rows(row_count: usize, descending: bool) -> Self {
        let next = if descending { row_count } else { 0 };
        ScanCursor { backing: Backing::RowOrder, lo: 0, hi: row_count, next, descending, current: None }
    }

    /// A cursor that yields no rows
    ///
    /// Used when a scan bound is known to exclude every row, e.g. a NULL
    /// value under a non-IS-NULL comparison.
    pub fn empty() -> ScanCursor<'static> {
        ScanCursor {
            backing: Backing::RowOrder,
            lo: 0,
            hi: 0,
            next: 0,
            descending: false,
            current: None,
        }
    }

    /// Step to the next row; returns false when the window is exhausted
    pub fn advance(&mut self) -> bool {
        let position = if self.descending {
            if self.next <= self.lo {
                self.current = None;
                return false;
            }
            self.next -= 1;
            self.next
        } else {
            if self.next >= self.hi {
                self.current = None;
                return false;
            }
            let position = self.next;
            self.next += 1;
            position
        };
        self.current = Some(match &self.backing {
            Backing::Index(entries) => entries[position].1,
            Backing::RowOrder => position,
        });
        true
    }

    /// Identity of the row the cursor is positioned on, if any
    pub fn current_row_id(&self) -> Option<RowId> {
        self.current
    }

    /// Exhaust the cursor and drop its position
    pub fn release(&mut self) {
        self.next = if self.descending { self.lo } else { self.hi };
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_order_forward_and_reverse() {
        let mut forward = ScanCursor::over_rows(3, false);
        let mut seen = Vec::new();
        while forward.advance() {
            seen.push(forward.current_row_id().unwrap());
        }
        assert_eq!(seen, vec![0, 1, 2]);

        let mut reverse = ScanCursor::over_rows(3, true);
        let mut seen = Vec::new();
        while reverse.advance() {
            seen.push(reverse.current_row_id().unwrap());
        }
        assert_eq!(seen, vec![2, 1, 0]);
    }

    #[test]
    fn release_exhausts() {
        let mut cursor = ScanCursor::over_rows(5, false);
        assert!(cursor.advance());
        cursor.release();
        assert!(!cursor.advance());
        assert_eq!(cursor.current_row_id(), None);
    }

    #[test]
    fn empty_cursor_yields_nothing() {
        let mut cursor = ScanCursor::empty();
        assert!(!cursor.advance());
    }
}
