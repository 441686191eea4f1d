//! Status command implementation

use anyhow::Result;
use vidmod_migrate::ComponentStatus;

use crate::cli::{GlobalArgs, StatusArgs};
use crate::commands::common::{print_json, print_table};
use crate::context::RuntimeContext;

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let migrator = ctx.migrator();

    let statuses = ctx
        .select_components(&[])?
        .iter()
        .map(|c| migrator.status(c))
        .collect::<Result<Vec<_>, _>>()?;

    if args.json {
        return print_json(&statuses);
    }

    let rows: Vec<Vec<String>> = statuses.iter().map(status_row).collect();
    print_table(&["COMPONENT", "INSTALLED", "LATEST", "PENDING", "STATE"], &rows);
    Ok(())
}

pub(crate) fn status_row(status: &ComponentStatus) -> Vec<String> {
    let installed = if status.installed.is_none() {
        "-".to_string()
    } else {
        status.installed.to_string()
    };
    let state = if status.is_current() {
        "current"
    } else if status.installed.is_none() {
        "not installed"
    } else {
        "upgrade pending"
    };
    vec![
        status.component.to_string(),
        installed,
        status.latest.to_string(),
        status.pending_steps.to_string(),
        state.to_string(),
    ]
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
