//! Column and table definitions.
//!
//! A [`ColumnSpec`] carries everything a backend needs to create a column
//! without inspecting current state: logical type, length, nullability,
//! default and an optional "insert after" placement hint.

use crate::names::{ColumnName, TableName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical column type, independent of any backend's SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Fixed-maximum character data
    Char,
    /// Unbounded text
    Text,
    /// Integer; `length` is the number of decimal digits
    Integer,
    /// Exact decimal number
    Number,
    /// Floating point number
    Float,
    /// Binary data
    Binary,
}

impl ColumnType {
    /// Whether defaults of this type are written as quoted string literals.
    pub fn is_textual(self) -> bool {
        matches!(self, ColumnType::Char | ColumnType::Text)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnType::Char => "char",
            ColumnType::Text => "text",
            ColumnType::Integer => "int",
            ColumnType::Number => "number",
            ColumnType::Float => "float",
            ColumnType::Binary => "binary",
        };
        f.write_str(s)
    }
}

/// Full definition of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name
    pub name: ColumnName,

    /// Logical type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Length (characters for `char`, digits for `int`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Digits after the decimal point (`number` only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,

    /// Reject NULL values
    #[serde(default)]
    pub not_null: bool,

    /// Default value, unquoted (e.g. `0`, `vimeo`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Placement hint: the column this one should follow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<ColumnName>,
}

impl ColumnSpec {
    /// Create a nullable column with no default.
    pub fn new(name: impl Into<ColumnName>, column_type: ColumnType, length: Option<u32>) -> Self {
        Self {
            name: name.into(),
            column_type,
            length,
            decimals: None,
            not_null: false,
            default: None,
            after: None,
        }
    }

    /// `char(length)` column.
    pub fn char(name: &str, length: u32) -> Self {
        Self::new(name, ColumnType::Char, Some(length))
    }

    /// `int(length)` column.
    pub fn integer(name: &str, length: u32) -> Self {
        Self::new(name, ColumnType::Integer, Some(length))
    }

    /// Unbounded `text` column.
    pub fn text(name: &str) -> Self {
        Self::new(name, ColumnType::Text, None)
    }

    /// Mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the placement hint.
    pub fn after(mut self, column: &str) -> Self {
        self.after = Some(ColumnName::new(column));
        self
    }
}

impl fmt::Display for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.column_type)?;
        if let Some(len) = self.length {
            write!(f, "({len})")?;
        }
        if self.not_null {
            f.write_str(" not null")?;
        }
        if let Some(default) = &self.default {
            write!(f, " default '{default}'")?;
        }
        Ok(())
    }
}

/// A table as created from scratch (a component's baseline).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    /// Logical table name
    pub name: TableName,

    /// Columns in declaration order
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    /// Create a table definition.
    pub fn new(name: &str, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name: TableName::new(name),
            columns,
        }
    }

    /// Look up a column definition by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
#[path = "column_test.rs"]
mod tests;
