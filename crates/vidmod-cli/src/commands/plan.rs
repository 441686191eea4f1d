//! Plan command implementation

use anyhow::Result;
use serde::Serialize;
use vidmod_core::SchemaVersion;
use vidmod_migrate::PlannedStep;

use crate::cli::{GlobalArgs, PlanArgs};
use crate::commands::common::print_json;
use crate::context::RuntimeContext;

#[derive(Serialize)]
struct ComponentPlan {
    component: String,
    from: SchemaVersion,
    steps: Vec<PlannedStep>,
}

/// Execute the plan command
pub(crate) fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let components = ctx.select_components(&args.components)?;
    let migrator = ctx.migrator();

    let mut plans = Vec::with_capacity(components.len());
    for component in &components {
        let from = match args.from {
            Some(v) => SchemaVersion::new(v),
            None => migrator.status(component)?.installed,
        };
        plans.push(ComponentPlan {
            component: component.to_string(),
            from,
            steps: migrator.plan(component, from)?,
        });
    }

    if args.json {
        return print_json(&plans);
    }
    for plan in &plans {
        print_plan(&plan.component, plan.from, &plan.steps);
    }
    Ok(())
}

/// Print the steps pending for one component.
pub(crate) fn print_plan(component: &str, from: SchemaVersion, steps: &[PlannedStep]) {
    println!("{}", format_plan(component, from, steps));
}

pub(crate) fn format_plan(component: &str, from: SchemaVersion, steps: &[PlannedStep]) -> String {
    if steps.is_empty() {
        return format!("{component}: nothing to do from {from}");
    }
    let mut out = vec![format!(
        "{component}: {} step(s) pending from {from}",
        steps.len()
    )];
    for step in steps {
        out.push(format!("  {}  {}", step.version, step.description));
        for op in &step.operations {
            out.push(format!("    - {op}"));
        }
    }
    out.join("\n")
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
