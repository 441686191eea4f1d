//! Schema migration engine for vidmod.
//!
//! Brings a component's persisted schema from whatever version is recorded
//! up to the latest known version. Steps are applied in ascending version
//! order and each one is checkpointed before the next begins, so an
//! interrupted run resumes where it stopped.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod registry;

pub use engine::{ComponentStatus, Migrator, OpOutcome, PlannedStep, RunSummary};
pub use error::{MigrateResult, MigrationError, MigrationErrorKind};
pub use registry::Registry;
