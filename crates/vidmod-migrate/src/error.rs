//! Error types for the migration engine.

use thiserror::Error;
use vidmod_core::{ComponentName, CoreError, OperationKind, SchemaVersion, TableName};
use vidmod_db::DbError;

/// Coarse classification of a [`MigrationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationErrorKind {
    Operation,
    Checkpoint,
    VersionRead,
    UnknownComponent,
    Baseline,
    InvalidComponent,
}

/// Migration engine errors.
///
/// Every variant raised during a run names the component, and step-level
/// variants name the target version of the step that stopped the run.
#[derive(Error, Debug)]
pub enum MigrationError {
    /// A column operation failed (MG001).
    #[error("[MG001] {component} step {version}: {operation} failed: {source}")]
    Operation {
        component: ComponentName,
        version: SchemaVersion,
        kind: OperationKind,
        operation: String,
        #[source]
        source: DbError,
    },

    /// The step's operations succeeded but the checkpoint write failed (MG002).
    #[error("[MG002] {component} step {version}: failed to record installed version: {source}")]
    Checkpoint {
        component: ComponentName,
        version: SchemaVersion,
        #[source]
        source: DbError,
    },

    /// The installed version could not be read (MG003).
    #[error("[MG003] {component}: failed to read installed version: {source}")]
    VersionRead {
        component: ComponentName,
        #[source]
        source: DbError,
    },

    /// No component with this name is registered (MG004).
    #[error("[MG004] Unknown component: {component}")]
    UnknownComponent { component: String },

    /// Creating a baseline table failed (MG005).
    #[error("[MG005] {component}: failed to create baseline table {table}: {source}")]
    Baseline {
        component: ComponentName,
        table: TableName,
        #[source]
        source: DbError,
    },

    /// A component definition violates the step ordering rules (MG006).
    #[error("[MG006] Invalid component definition: {0}")]
    InvalidComponent(#[from] CoreError),
}

impl MigrationError {
    /// Classify the error.
    pub fn kind(&self) -> MigrationErrorKind {
        match self {
            MigrationError::Operation { .. } => MigrationErrorKind::Operation,
            MigrationError::Checkpoint { .. } => MigrationErrorKind::Checkpoint,
            MigrationError::VersionRead { .. } => MigrationErrorKind::VersionRead,
            MigrationError::UnknownComponent { .. } => MigrationErrorKind::UnknownComponent,
            MigrationError::Baseline { .. } => MigrationErrorKind::Baseline,
            MigrationError::InvalidComponent(_) => MigrationErrorKind::InvalidComponent,
        }
    }

    /// Target version of the step that failed, for step-level errors.
    pub fn step_version(&self) -> Option<SchemaVersion> {
        match self {
            MigrationError::Operation { version, .. }
            | MigrationError::Checkpoint { version, .. } => Some(*version),
            _ => None,
        }
    }
}

/// Result type alias for [`MigrationError`].
pub type MigrateResult<T> = Result<T, MigrationError>;
