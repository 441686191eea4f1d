use super::*;
use chrono::TimeZone;

#[test]
fn test_column_widths() {
    let widths = calculate_column_widths(
        &["COMPONENT", "LATEST"],
        &[vec!["video".into(), "2023101702".into()]],
    );
    assert_eq!(widths, vec![9, 10]);
}

#[test]
fn test_format_table() {
    let out = format_table(
        &["NAME", "STEPS"],
        &[
            vec!["video".into(), "11".into()],
            vec!["quiz".into(), "3".into()],
        ],
    );
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "NAME   STEPS");
    assert_eq!(lines[1], "-----  -----");
    assert_eq!(lines[2], "video  11");
    assert_eq!(lines[3], "quiz   3");
}

#[test]
fn test_format_timestamp() {
    let ts = Utc.with_ymd_and_hms(2023, 10, 17, 9, 5, 0).unwrap();
    assert_eq!(format_timestamp(&ts), "2023-10-17 09:05:00");
}
