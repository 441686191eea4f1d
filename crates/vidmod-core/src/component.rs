//! Versioned components and their migration steps.

use crate::column::TableSpec;
use crate::error::{CoreError, CoreResult};
use crate::names::ComponentName;
use crate::operation::ColumnOperation;
use crate::version::SchemaVersion;
use serde::Serialize;
use std::collections::HashSet;

/// One versioned batch of column operations.
///
/// Applying every operation advances the component to `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationStep {
    /// The version this step advances the component to
    pub version: SchemaVersion,

    /// Short summary shown in plans and logs
    pub description: String,

    /// Operations, applied in order
    pub operations: Vec<ColumnOperation>,
}

impl MigrationStep {
    /// Create a step.
    pub fn new(
        version: i64,
        description: impl Into<String>,
        operations: Vec<ColumnOperation>,
    ) -> Self {
        Self {
            version: SchemaVersion::new(version),
            description: description.into(),
            operations,
        }
    }
}

/// A named schema unit with its baseline tables and ordered upgrade steps.
///
/// Construction goes through [`Component::new`], which guarantees that step
/// versions are positive, unique and strictly increasing.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    name: ComponentName,
    baseline: Vec<TableSpec>,
    steps: Vec<MigrationStep>,
}

impl Component {
    /// Validate and build a component.
    pub fn new(
        name: ComponentName,
        baseline: Vec<TableSpec>,
        steps: Vec<MigrationStep>,
    ) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for table in &baseline {
            if !seen.insert(table.name.as_str()) {
                return Err(CoreError::DuplicateBaselineTable {
                    component: name.to_string(),
                    table: table.name.to_string(),
                });
            }
        }

        let mut previous = SchemaVersion::NONE;
        for step in &steps {
            if step.version <= previous {
                return Err(CoreError::StepOrder {
                    component: name.to_string(),
                    version: step.version.get(),
                    previous: previous.get(),
                });
            }
            if step.operations.is_empty() {
                return Err(CoreError::EmptyStep {
                    component: name.to_string(),
                    version: step.version.get(),
                });
            }
            previous = step.version;
        }

        Ok(Self {
            name,
            baseline,
            steps,
        })
    }

    /// Component name.
    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    /// Tables as they exist before the first step.
    pub fn baseline(&self) -> &[TableSpec] {
        &self.baseline
    }

    /// All steps in ascending version order.
    pub fn steps(&self) -> &[MigrationStep] {
        &self.steps
    }

    /// Highest known version, or [`SchemaVersion::NONE`] with no steps.
    pub fn latest_version(&self) -> SchemaVersion {
        self.steps
            .last()
            .map(|s| s.version)
            .unwrap_or(SchemaVersion::NONE)
    }

    /// Steps not yet applied at `installed`, in order.
    pub fn pending_steps(&self, installed: SchemaVersion) -> impl Iterator<Item = &MigrationStep> {
        self.steps.iter().filter(move |s| s.version > installed)
    }

    /// Whether `installed` is older than the latest step.
    pub fn needs_upgrade(&self, installed: SchemaVersion) -> bool {
        installed < self.latest_version()
    }
}

#[cfg(test)]
#[path = "component_test.rs"]
mod tests;
