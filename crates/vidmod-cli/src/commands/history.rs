//! History command implementation

use anyhow::{Context, Result};
use vidmod_db::SchemaBackend;

use crate::cli::{GlobalArgs, HistoryArgs};
use crate::commands::common::{format_timestamp, print_table};
use crate::context::RuntimeContext;

/// Execute the history command
pub(crate) fn execute(args: &HistoryArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;

    let component = match &args.component {
        Some(name) => Some(ctx.registry.get(name)?.name().clone()),
        None => None,
    };

    let records = ctx
        .backend
        .version_history(component.as_ref())
        .context("Failed to read version history")?;

    if records.is_empty() {
        println!("No checkpoints recorded.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                format_timestamp(&r.recorded_at),
                r.component.to_string(),
                r.version.to_string(),
            ]
        })
        .collect();
    print_table(&["RECORDED AT", "COMPONENT", "VERSION"], &rows);
    Ok(())
}
