//! Schema storage backend trait

use crate::error::DbResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use vidmod_core::{ColumnName, ColumnSpec, ComponentName, SchemaVersion, TableName, TableSpec};

/// A column as currently stored by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// Backend-specific type name (e.g. `VARCHAR`, `SMALLINT`)
    pub data_type: String,
    /// Whether NULLs are accepted
    pub nullable: bool,
    /// Default expression as reported by the backend
    pub default: Option<String>,
}

/// One recorded checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionRecord {
    pub component: ComponentName,
    pub version: SchemaVersion,
    pub recorded_at: DateTime<Utc>,
}

/// Storage capability the migration engine runs against.
///
/// Table names are logical; a backend may map them to prefixed physical
/// names. `set_installed_version` must be durable before it returns.
pub trait SchemaBackend {
    /// Backend type identifier for logging
    fn backend_type(&self) -> &'static str;

    /// Check if a table exists
    fn table_exists(&self, table: &TableName) -> DbResult<bool>;

    /// Create a table from its full definition
    fn create_table(&self, spec: &TableSpec) -> DbResult<()>;

    /// Check if a column exists; `false` when the table itself is missing
    fn column_exists(&self, table: &TableName, column: &ColumnName) -> DbResult<bool>;

    /// Current columns of a table, in storage order
    fn table_columns(&self, table: &TableName) -> DbResult<Vec<ColumnInfo>>;

    /// Add a column
    fn add_column(&self, table: &TableName, spec: &ColumnSpec) -> DbResult<()>;

    /// Drop a column
    fn drop_column(&self, table: &TableName, column: &ColumnName) -> DbResult<()>;

    /// Rename a column; fails if `from` does not exist
    fn rename_column(&self, table: &TableName, from: &ColumnName, to: &ColumnName)
        -> DbResult<()>;

    /// Replace a column's default (`None` drops it)
    fn set_column_default(
        &self,
        table: &TableName,
        column: &ColumnName,
        default: Option<&str>,
    ) -> DbResult<()>;

    /// Installed version of a component, [`SchemaVersion::NONE`] if never recorded
    fn installed_version(&self, component: &ComponentName) -> DbResult<SchemaVersion>;

    /// Durably record the installed version of a component
    fn set_installed_version(
        &self,
        component: &ComponentName,
        version: SchemaVersion,
    ) -> DbResult<()>;

    /// Recorded checkpoints, oldest first, optionally for one component
    fn version_history(&self, component: Option<&ComponentName>) -> DbResult<Vec<VersionRecord>>;
}
