//! Storage - in-memory tables, ordered indexes and scan cursors
//!
//! This crate provides the row store and the ordered-index access structure
//! consumed by the executor through a narrow cursor contract: bounded
//! forward/backward scan open, full-scan open, and `advance()` /
//! `current_row_id()` / `release()` on the resulting cursor.

mod cursor;
mod database;
mod error;
mod index;
mod row;
mod table;

pub use cursor::ScanCursor;
pub use database::Database;
pub use error::StorageError;
pub use index::{OrderedIndex, SeekOp};
pub use row::{Row, RowId};
pub use table::Table;
