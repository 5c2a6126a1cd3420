//! Database: named table registry

use indexmap::IndexMap;
use wrensql_catalog::TableSchema;

use crate::error::StorageError;
use crate::table::Table;

/// A database is a registry of tables, iterated in creation order
#[derive(Debug, Default)]
pub struct Database {
    tables: IndexMap<String, Table>,
}

impl Database {
    /// Create an empty database
    pub fn new() -> Self {
        Database { tables: IndexMap::new() }
    }

    /// Create a table from its schema
    pub fn create_table(&mut self, schema: TableSchema) -> Result<&mut Table, StorageError> {
        let name = schema.name.clone();
        if self.tables.contains_key(&name) {
            return Err(StorageError::TableAlreadyExists(name));
        }
        Ok(self.tables.entry(name).or_insert_with(|| Table::new(schema)))
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Result<&Table, StorageError> {
        self.tables.get(name).ok_or_else(|| StorageError::TableNotFound(name.to_string()))
    }

    /// Look up a table mutably by name
    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table, StorageError> {
        self.tables.get_mut(name).ok_or_else(|| StorageError::TableNotFound(name.to_string()))
    }

    /// Table names in creation order
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|s| s.as_str())
    }
}
