//! vidmod-db - Schema storage backends for vidmod
//!
//! This crate provides the `SchemaBackend` trait the migration engine drives,
//! a durable DuckDB implementation and an in-memory implementation used by
//! the engine tests.

pub mod duckdb;
pub mod error;
pub mod memory;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use memory::MemoryBackend;
pub use traits::{ColumnInfo, SchemaBackend, VersionRecord};
