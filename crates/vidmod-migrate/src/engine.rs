//! Migration runner.
//!
//! Walks a component's steps in ascending version order, skips every step at
//! or below the installed version, applies the rest one operation at a time
//! and records a checkpoint after each step.

use crate::error::{MigrateResult, MigrationError};
use crate::registry::Registry;
use serde::Serialize;
use vidmod_core::{ColumnOperation, Component, ComponentName, SchemaVersion};
use vidmod_db::SchemaBackend;

/// Result of applying a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpOutcome {
    /// The backend was changed
    Applied,
    /// The schema was already in the desired state
    NoOp,
}

/// What a call to [`Migrator::run`] did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub component: ComponentName,
    /// Installed version before the run
    pub from: SchemaVersion,
    /// Installed version after the run
    pub to: SchemaVersion,
    /// Versions of the steps applied and checkpointed, in order
    pub applied: Vec<SchemaVersion>,
    pub operations_applied: usize,
    pub operations_noop: usize,
}

impl RunSummary {
    /// Whether the run changed the installed version.
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// A step [`Migrator::run`] would apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub version: SchemaVersion,
    pub description: String,
    pub operations: Vec<ColumnOperation>,
}

/// Installed and latest version of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentStatus {
    pub component: ComponentName,
    pub installed: SchemaVersion,
    pub latest: SchemaVersion,
    pub pending_steps: usize,
}

impl ComponentStatus {
    /// Whether every known step has been applied.
    pub fn is_current(&self) -> bool {
        self.pending_steps == 0
    }
}

/// Applies versioned migration steps against an injected backend.
pub struct Migrator<'a, B: SchemaBackend + ?Sized> {
    backend: &'a B,
    registry: &'a Registry,
}

impl<'a, B: SchemaBackend + ?Sized> Migrator<'a, B> {
    /// Create a migrator over `backend` for the components in `registry`.
    pub fn new(backend: &'a B, registry: &'a Registry) -> Self {
        Self { backend, registry }
    }

    /// Bring `component` from `installed` up to its latest version.
    ///
    /// Each pending step's operations run in order; once all of them succeed
    /// the step's version is written as the installed version before the
    /// next step is touched. The first failure stops the run, leaving the
    /// checkpoint at the last completed step.
    pub fn run(
        &self,
        component: &ComponentName,
        installed: SchemaVersion,
    ) -> MigrateResult<RunSummary> {
        let definition = self.registry.get(component)?;
        let mut summary = RunSummary {
            component: component.clone(),
            from: installed,
            to: installed,
            applied: Vec::new(),
            operations_applied: 0,
            operations_noop: 0,
        };

        for step in definition.steps() {
            if step.version <= installed {
                log::debug!("{component}: step {} already applied, skipping", step.version);
                continue;
            }

            for op in &step.operations {
                match self.apply_operation(component, step.version, op)? {
                    OpOutcome::Applied => summary.operations_applied += 1,
                    OpOutcome::NoOp => summary.operations_noop += 1,
                }
            }

            self.backend
                .set_installed_version(component, step.version)
                .map_err(|source| MigrationError::Checkpoint {
                    component: component.clone(),
                    version: step.version,
                    source,
                })?;
            summary.to = step.version;
            summary.applied.push(step.version);
            log::info!(
                "{component}: upgraded to {} ({})",
                step.version,
                step.description
            );
        }

        Ok(summary)
    }

    /// Apply one operation on behalf of `component`'s step `version`.
    ///
    /// `AddColumn` and `DropColumn` probe the column first and succeed
    /// without change when it is already in the desired state. `RenameColumn`
    /// does not probe: a missing source column is an error even when the
    /// target already exists. `ChangeDefault` always writes.
    pub fn apply_operation(
        &self,
        component: &ComponentName,
        version: SchemaVersion,
        op: &ColumnOperation,
    ) -> MigrateResult<OpOutcome> {
        let wrap = |source| MigrationError::Operation {
            component: component.clone(),
            version,
            kind: op.kind(),
            operation: op.describe(),
            source,
        };

        let outcome = match op {
            ColumnOperation::AddColumn { table, spec } => {
                if self.backend.column_exists(table, &spec.name).map_err(wrap)? {
                    OpOutcome::NoOp
                } else {
                    self.backend.add_column(table, spec).map_err(wrap)?;
                    OpOutcome::Applied
                }
            }
            ColumnOperation::DropColumn { table, column } => {
                if self.backend.column_exists(table, column).map_err(wrap)? {
                    self.backend.drop_column(table, column).map_err(wrap)?;
                    OpOutcome::Applied
                } else {
                    OpOutcome::NoOp
                }
            }
            ColumnOperation::RenameColumn { table, from, to } => {
                self.backend.rename_column(table, from, to).map_err(wrap)?;
                OpOutcome::Applied
            }
            ColumnOperation::ChangeDefault {
                table,
                column,
                default,
            } => {
                self.backend
                    .set_column_default(table, column, default.as_deref())
                    .map_err(wrap)?;
                OpOutcome::Applied
            }
        };

        match outcome {
            OpOutcome::Applied => log::debug!("{component} {version}: {op}"),
            OpOutcome::NoOp => log::debug!("{component} {version}: {op} (already in place)"),
        }
        Ok(outcome)
    }

    /// Installer entry point: read the recorded version, lay down the
    /// baseline tables on a fresh install, then [`run`](Self::run).
    pub fn upgrade(&self, component: &ComponentName) -> MigrateResult<RunSummary> {
        let installed = self.installed_version(component)?;
        if installed.is_none() {
            self.install_baseline(self.registry.get(component)?)?;
        }
        self.run(component, installed)
    }

    /// Create every baseline table of `component` that does not exist yet.
    ///
    /// Returns the number of tables created.
    pub fn install_baseline(&self, component: &Component) -> MigrateResult<usize> {
        let mut created = 0;
        for table in component.baseline() {
            let wrap = |source| MigrationError::Baseline {
                component: component.name().clone(),
                table: table.name.clone(),
                source,
            };
            if self.backend.table_exists(&table.name).map_err(wrap)? {
                continue;
            }
            log::warn!(
                "{}: creating missing baseline table {}",
                component.name(),
                table.name
            );
            self.backend.create_table(table).map_err(wrap)?;
            created += 1;
        }
        Ok(created)
    }

    /// Steps [`run`](Self::run) would apply from `installed`.
    pub fn plan(
        &self,
        component: &ComponentName,
        installed: SchemaVersion,
    ) -> MigrateResult<Vec<PlannedStep>> {
        Ok(self
            .registry
            .get(component)?
            .pending_steps(installed)
            .map(|step| PlannedStep {
                version: step.version,
                description: step.description.clone(),
                operations: step.operations.clone(),
            })
            .collect())
    }

    /// Installed versus latest version of `component`.
    pub fn status(&self, component: &ComponentName) -> MigrateResult<ComponentStatus> {
        let definition = self.registry.get(component)?;
        let installed = self.installed_version(component)?;
        Ok(ComponentStatus {
            component: component.clone(),
            installed,
            latest: definition.latest_version(),
            pending_steps: definition.pending_steps(installed).count(),
        })
    }

    fn installed_version(&self, component: &ComponentName) -> MigrateResult<SchemaVersion> {
        self.backend
            .installed_version(component)
            .map_err(|source| MigrationError::VersionRead {
                component: component.clone(),
                source,
            })
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
