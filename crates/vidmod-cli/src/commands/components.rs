//! Components command implementation

use anyhow::{Context, Result};
use vidmod_migrate::Registry;

use crate::commands::common::print_table;

/// Execute the components command
pub(crate) fn execute() -> Result<()> {
    let registry = Registry::builtin().context("Failed to load component catalog")?;
    print_table(&["COMPONENT", "TABLES", "STEPS", "LATEST"], &component_rows(&registry));
    Ok(())
}

pub(crate) fn component_rows(registry: &Registry) -> Vec<Vec<String>> {
    registry
        .components()
        .iter()
        .map(|c| {
            vec![
                c.name().to_string(),
                c.baseline()
                    .iter()
                    .map(|t| t.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                c.steps().len().to_string(),
                c.latest_version().to_string(),
            ]
        })
        .collect()
}

#[cfg(test)]
#[path = "components_test.rs"]
mod tests;
