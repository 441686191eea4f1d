//! In-memory schema backend.
//!
//! Models tables as ordered column lists and keeps a journal of every
//! mutating call, which makes it the backend of choice for engine tests.

use crate::error::{DbError, DbResult};
use crate::traits::{ColumnInfo, SchemaBackend, VersionRecord};
use chrono::Utc;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use vidmod_core::{ColumnName, ColumnSpec, ComponentName, SchemaVersion, TableName, TableSpec};

#[derive(Debug, Default)]
struct State {
    tables: BTreeMap<String, Vec<ColumnSpec>>,
    versions: HashMap<String, SchemaVersion>,
    history: Vec<VersionRecord>,
    journal: Vec<String>,
}

/// Schema backend that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: RefCell<State>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutating calls made so far, e.g. `add_column video.youtubeurl`.
    ///
    /// Checkpoint writes are journaled as `set_installed_version video 20`.
    pub fn journal(&self) -> Vec<String> {
        self.state.borrow().journal.clone()
    }

    /// Forget the journal, keeping schema and versions.
    pub fn clear_journal(&self) {
        self.state.borrow_mut().journal.clear();
    }

    /// Column names of a table in storage order, `None` if the table is missing.
    pub fn column_names(&self, table: &str) -> Option<Vec<String>> {
        self.state
            .borrow()
            .tables
            .get(table)
            .map(|cols| cols.iter().map(|c| c.name.to_string()).collect())
    }

    /// Full definition of one column.
    pub fn column_spec(&self, table: &str, column: &str) -> Option<ColumnSpec> {
        self.state
            .borrow()
            .tables
            .get(table)
            .and_then(|cols| cols.iter().find(|c| c.name == column).cloned())
    }

    fn record(&self, entry: String) {
        self.state.borrow_mut().journal.push(entry);
    }
}

fn column_not_found(table: &TableName, column: &ColumnName) -> DbError {
    DbError::ColumnNotFound {
        table: table.to_string(),
        column: column.to_string(),
    }
}

impl SchemaBackend for MemoryBackend {
    fn backend_type(&self) -> &'static str {
        "memory"
    }

    fn table_exists(&self, table: &TableName) -> DbResult<bool> {
        Ok(self.state.borrow().tables.contains_key(table.as_str()))
    }

    fn create_table(&self, spec: &TableSpec) -> DbResult<()> {
        {
            let mut state = self.state.borrow_mut();
            if state.tables.contains_key(spec.name.as_str()) {
                return Err(DbError::TableExists(spec.name.to_string()));
            }
            state
                .tables
                .insert(spec.name.to_string(), spec.columns.clone());
        }
        self.record(format!("create_table {}", spec.name));
        Ok(())
    }

    fn column_exists(&self, table: &TableName, column: &ColumnName) -> DbResult<bool> {
        Ok(self
            .state
            .borrow()
            .tables
            .get(table.as_str())
            .is_some_and(|cols| cols.iter().any(|c| &c.name == column)))
    }

    fn table_columns(&self, table: &TableName) -> DbResult<Vec<ColumnInfo>> {
        let state = self.state.borrow();
        let cols = state
            .tables
            .get(table.as_str())
            .ok_or_else(|| DbError::TableNotFound(table.to_string()))?;
        Ok(cols
            .iter()
            .map(|c| ColumnInfo {
                name: c.name.to_string(),
                data_type: c.column_type.to_string(),
                nullable: !c.not_null,
                default: c.default.clone(),
            })
            .collect())
    }

    fn add_column(&self, table: &TableName, spec: &ColumnSpec) -> DbResult<()> {
        {
            let mut state = self.state.borrow_mut();
            let cols = state
                .tables
                .get_mut(table.as_str())
                .ok_or_else(|| DbError::TableNotFound(table.to_string()))?;
            if cols.iter().any(|c| c.name == spec.name) {
                return Err(DbError::ColumnExists {
                    table: table.to_string(),
                    column: spec.name.to_string(),
                });
            }
            let position = spec
                .after
                .as_ref()
                .and_then(|after| cols.iter().position(|c| &c.name == after))
                .map(|i| i + 1)
                .unwrap_or(cols.len());
            cols.insert(position, spec.clone());
        }
        self.record(format!("add_column {table}.{}", spec.name));
        Ok(())
    }

    fn drop_column(&self, table: &TableName, column: &ColumnName) -> DbResult<()> {
        {
            let mut state = self.state.borrow_mut();
            let cols = state
                .tables
                .get_mut(table.as_str())
                .ok_or_else(|| column_not_found(table, column))?;
            let index = cols
                .iter()
                .position(|c| &c.name == column)
                .ok_or_else(|| column_not_found(table, column))?;
            cols.remove(index);
        }
        self.record(format!("drop_column {table}.{column}"));
        Ok(())
    }

    fn rename_column(
        &self,
        table: &TableName,
        from: &ColumnName,
        to: &ColumnName,
    ) -> DbResult<()> {
        {
            let mut state = self.state.borrow_mut();
            let cols = state
                .tables
                .get_mut(table.as_str())
                .ok_or_else(|| column_not_found(table, from))?;
            let index = cols
                .iter()
                .position(|c| &c.name == from)
                .ok_or_else(|| column_not_found(table, from))?;
            if cols.iter().any(|c| &c.name == to) {
                return Err(DbError::ColumnExists {
                    table: table.to_string(),
                    column: to.to_string(),
                });
            }
            cols[index].name = to.clone();
        }
        self.record(format!("rename_column {table}.{from} {to}"));
        Ok(())
    }

    fn set_column_default(
        &self,
        table: &TableName,
        column: &ColumnName,
        default: Option<&str>,
    ) -> DbResult<()> {
        {
            let mut state = self.state.borrow_mut();
            let col = state
                .tables
                .get_mut(table.as_str())
                .and_then(|cols| cols.iter_mut().find(|c| &c.name == column))
                .ok_or_else(|| column_not_found(table, column))?;
            col.default = default.map(str::to_string);
        }
        self.record(format!("set_column_default {table}.{column}"));
        Ok(())
    }

    fn installed_version(&self, component: &ComponentName) -> DbResult<SchemaVersion> {
        Ok(self
            .state
            .borrow()
            .versions
            .get(component.as_str())
            .copied()
            .unwrap_or(SchemaVersion::NONE))
    }

    fn set_installed_version(
        &self,
        component: &ComponentName,
        version: SchemaVersion,
    ) -> DbResult<()> {
        {
            let mut state = self.state.borrow_mut();
            state.versions.insert(component.to_string(), version);
            state.history.push(VersionRecord {
                component: component.clone(),
                version,
                recorded_at: Utc::now(),
            });
        }
        self.record(format!("set_installed_version {component} {version}"));
        Ok(())
    }

    fn version_history(&self, component: Option<&ComponentName>) -> DbResult<Vec<VersionRecord>> {
        Ok(self
            .state
            .borrow()
            .history
            .iter()
            .filter(|r| component.map_or(true, |c| &r.component == c))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
