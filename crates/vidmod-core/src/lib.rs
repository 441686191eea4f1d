//! vidmod-core - Core library for vidmod
//!
//! This crate provides the schema vocabulary shared by every vidmod crate:
//! strongly-typed names, schema versions, column and table definitions,
//! column operations, versioned migration steps, components, and the
//! `vidmod.yml` project configuration.

pub mod column;
pub mod component;
pub mod config;
pub mod error;
pub mod names;
mod newtype_string;
pub mod operation;
pub mod version;

pub use column::{ColumnSpec, ColumnType, TableSpec};
pub use component::{Component, MigrationStep};
pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use names::{ColumnName, ComponentName, TableName};
pub use operation::{ColumnOperation, OperationKind};
pub use version::SchemaVersion;
