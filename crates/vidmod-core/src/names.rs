//! Strongly-typed names for components, tables and columns.

use crate::newtype_string::define_identifier;

define_identifier! {
    /// Name of an independently versioned schema unit (e.g. `video`).
    pub struct ComponentName;
}

define_identifier! {
    /// Logical table name, before any backend-level prefix is applied.
    pub struct TableName;
}

define_identifier! {
    /// Column name within a table.
    pub struct ColumnName;
}

#[cfg(test)]
#[path = "names_test.rs"]
mod tests;
