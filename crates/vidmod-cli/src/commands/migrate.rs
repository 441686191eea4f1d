//! Migrate command implementation

use anyhow::{Context, Result};
use vidmod_migrate::RunSummary;

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::plan::print_plan;
use crate::context::RuntimeContext;

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let components = ctx.select_components(&args.components)?;
    let migrator = ctx.migrator();

    if args.dry_run {
        for component in &components {
            let status = migrator.status(component)?;
            let steps = migrator.plan(component, status.installed)?;
            print_plan(component.as_str(), status.installed, &steps);
        }
        return Ok(());
    }

    let mut upgraded = 0;
    for component in &components {
        // Fail-stop: the checkpoint already marks the last completed step,
        // so a rerun resumes from there.
        let summary = migrator
            .upgrade(component)
            .with_context(|| format!("Failed to upgrade component '{component}'"))?;
        println!("{}", summary_line(&summary));
        if !summary.is_noop() {
            upgraded += 1;
        }
    }

    if global.verbose {
        println!(
            "\n{} of {} component(s) upgraded",
            upgraded,
            components.len()
        );
    }
    Ok(())
}

/// One-line report for a finished run.
pub(crate) fn summary_line(summary: &RunSummary) -> String {
    if summary.is_noop() {
        return format!("{}: up to date at {}", summary.component, summary.to);
    }
    let mut line = format!(
        "{}: {} -> {} ({} step(s), {} operation(s) applied",
        summary.component,
        summary.from,
        summary.to,
        summary.applied.len(),
        summary.operations_applied
    );
    if summary.operations_noop > 0 {
        line.push_str(&format!(", {} already in place", summary.operations_noop));
    }
    line.push(')');
    line
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
