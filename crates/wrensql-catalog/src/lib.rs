//! Catalog - table and index metadata
//!
//! This crate provides the schema structures consumed by the storage and
//! executor layers: table/column definitions and index metadata,
//! independent of the physical index storage.

mod column;
mod index;
mod schema;

pub use column::ColumnSchema;
pub use index::{IndexMetadata, IndexedColumn, SortOrder};
pub use schema::TableSchema;
