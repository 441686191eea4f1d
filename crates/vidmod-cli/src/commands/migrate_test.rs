use super::*;
use vidmod_core::{ComponentName, SchemaVersion};

fn summary(from: i64, applied: &[i64], ops: usize, noop: usize) -> RunSummary {
    RunSummary {
        component: ComponentName::new("video"),
        from: SchemaVersion::new(from),
        to: SchemaVersion::new(applied.last().copied().unwrap_or(from)),
        applied: applied.iter().copied().map(SchemaVersion::new).collect(),
        operations_applied: ops,
        operations_noop: noop,
    }
}

#[test]
fn test_summary_line_up_to_date() {
    let line = summary_line(&summary(2023101702, &[], 0, 0));
    assert_eq!(line, "video: up to date at 2023101702");
}

#[test]
fn test_summary_line_upgrade() {
    let line = summary_line(&summary(2022072900, &[2023101701, 2023101702], 2, 0));
    assert_eq!(
        line,
        "video: 2022072900 -> 2023101702 (2 step(s), 2 operation(s) applied)"
    );
}

#[test]
fn test_summary_line_reports_noops() {
    let line = summary_line(&summary(0, &[2022060600], 1, 3));
    assert_eq!(
        line,
        "video: 0 -> 2022060600 (1 step(s), 1 operation(s) applied, 3 already in place)"
    );
}
