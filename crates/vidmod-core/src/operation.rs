//! Column-level schema operations.

use crate::column::ColumnSpec;
use crate::names::{ColumnName, TableName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`ColumnOperation`], for reporting and classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    AddColumn,
    DropColumn,
    RenameColumn,
    ChangeDefault,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::AddColumn => "add_column",
            OperationKind::DropColumn => "drop_column",
            OperationKind::RenameColumn => "rename_column",
            OperationKind::ChangeDefault => "change_default",
        };
        f.write_str(s)
    }
}

/// A single schema change addressed by `(table, column)`.
///
/// `AddColumn` and `DropColumn` are applied idempotently (existence is probed
/// first). `RenameColumn` is not: renaming a column that is already gone is
/// an error. `ChangeDefault` always rewrites the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ColumnOperation {
    /// Create a column
    AddColumn { table: TableName, spec: ColumnSpec },

    /// Remove a column
    DropColumn { table: TableName, column: ColumnName },

    /// Rename a column from `from` to `to`
    RenameColumn {
        table: TableName,
        from: ColumnName,
        to: ColumnName,
    },

    /// Replace a column's default (`None` drops the default)
    ChangeDefault {
        table: TableName,
        column: ColumnName,
        default: Option<String>,
    },
}

impl ColumnOperation {
    /// `AddColumn` shorthand.
    pub fn add(table: &str, spec: ColumnSpec) -> Self {
        ColumnOperation::AddColumn {
            table: TableName::new(table),
            spec,
        }
    }

    /// `DropColumn` shorthand.
    pub fn drop(table: &str, column: &str) -> Self {
        ColumnOperation::DropColumn {
            table: TableName::new(table),
            column: ColumnName::new(column),
        }
    }

    /// `RenameColumn` shorthand.
    pub fn rename(table: &str, from: &str, to: &str) -> Self {
        ColumnOperation::RenameColumn {
            table: TableName::new(table),
            from: ColumnName::new(from),
            to: ColumnName::new(to),
        }
    }

    /// `ChangeDefault` shorthand.
    pub fn change_default(table: &str, column: &str, default: Option<&str>) -> Self {
        ColumnOperation::ChangeDefault {
            table: TableName::new(table),
            column: ColumnName::new(column),
            default: default.map(str::to_string),
        }
    }

    /// The table this operation addresses.
    pub fn table(&self) -> &TableName {
        match self {
            ColumnOperation::AddColumn { table, .. }
            | ColumnOperation::DropColumn { table, .. }
            | ColumnOperation::RenameColumn { table, .. }
            | ColumnOperation::ChangeDefault { table, .. } => table,
        }
    }

    /// The column this operation addresses (the old name for renames).
    pub fn column(&self) -> &ColumnName {
        match self {
            ColumnOperation::AddColumn { spec, .. } => &spec.name,
            ColumnOperation::DropColumn { column, .. }
            | ColumnOperation::ChangeDefault { column, .. } => column,
            ColumnOperation::RenameColumn { from, .. } => from,
        }
    }

    /// The operation's discriminant.
    pub fn kind(&self) -> OperationKind {
        match self {
            ColumnOperation::AddColumn { .. } => OperationKind::AddColumn,
            ColumnOperation::DropColumn { .. } => OperationKind::DropColumn,
            ColumnOperation::RenameColumn { .. } => OperationKind::RenameColumn,
            ColumnOperation::ChangeDefault { .. } => OperationKind::ChangeDefault,
        }
    }

    /// Human-readable one-line description.
    pub fn describe(&self) -> String {
        match self {
            ColumnOperation::AddColumn { table, spec } => {
                format!("add column {table}.{spec}")
            }
            ColumnOperation::DropColumn { table, column } => {
                format!("drop column {table}.{column}")
            }
            ColumnOperation::RenameColumn { table, from, to } => {
                format!("rename column {table}.{from} to {to}")
            }
            ColumnOperation::ChangeDefault {
                table,
                column,
                default,
            } => match default {
                Some(d) => format!("set default of {table}.{column} to '{d}'"),
                None => format!("drop default of {table}.{column}"),
            },
        }
    }
}

impl fmt::Display for ColumnOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
#[path = "operation_test.rs"]
mod tests;
