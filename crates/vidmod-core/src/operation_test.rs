use super::*;

#[test]
fn test_describe_each_kind() {
    let add = ColumnOperation::add("video", ColumnSpec::char("vimeourl", 1000).after("youtubeurl"));
    assert_eq!(add.describe(), "add column video.vimeourl char(1000)");
    assert_eq!(add.kind(), OperationKind::AddColumn);

    let drop = ColumnOperation::drop("video", "url");
    assert_eq!(drop.describe(), "drop column video.url");

    let rename = ColumnOperation::rename("video", "loop", "loopvideo");
    assert_eq!(rename.describe(), "rename column video.loop to loopvideo");
    assert_eq!(rename.column(), "loop");

    let default = ColumnOperation::change_default("video", "resume", Some("1"));
    assert_eq!(default.describe(), "set default of video.resume to '1'");
    let cleared = ColumnOperation::change_default("video", "resume", None);
    assert_eq!(cleared.describe(), "drop default of video.resume");
}

#[test]
fn test_table_accessor() {
    let op = ColumnOperation::add("video_session", ColumnSpec::integer("usermodified", 10));
    assert_eq!(op.table(), "video_session");
    assert_eq!(op.column(), "usermodified");
}

#[test]
fn test_tagged_serialization() {
    let op = ColumnOperation::rename("video", "preventfowardseeking", "preventforwardseeking");
    let json = serde_json::to_value(&op).unwrap();
    assert_eq!(json["op"], "rename_column");
    assert_eq!(json["table"], "video");
    assert_eq!(json["to"], "preventforwardseeking");
}

#[test]
fn test_parse_operation_yaml() {
    let yaml = r#"
op: drop_column
table: video
column: url
"#;
    let op: ColumnOperation = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(op, ColumnOperation::drop("video", "url"));
}
