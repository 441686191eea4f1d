use super::*;

#[test]
fn test_table_name_creation() {
    let name = TableName::new("video_session");
    assert_eq!(name.as_str(), "video_session");
    assert_eq!(format!("{}", name), "video_session");
}

#[test]
fn test_column_name_deref() {
    let name = ColumnName::new("youtubeurl");
    assert!(name.starts_with("youtube"));
    assert_eq!(name, "youtubeurl");
}

#[test]
fn test_try_new_rejects_non_identifiers() {
    assert!(ColumnName::try_new("").is_none());
    assert!(ColumnName::try_new("drop table").is_none());
    assert!(ColumnName::try_new("a;b").is_none());
    assert!(ColumnName::try_new("loop_video2").is_some());
}

#[test]
#[should_panic(expected = "must be a non-empty identifier")]
fn test_new_panics_on_empty() {
    let _ = ComponentName::new("");
}

#[test]
fn test_deserialize_rejects_invalid() {
    let ok: ComponentName = serde_yaml::from_str("video").unwrap();
    assert_eq!(ok, "video");
    let err = serde_yaml::from_str::<ComponentName>("\"vid eo\"");
    assert!(err.is_err());
}

#[test]
fn test_serialize_is_transparent() {
    let name = TableName::new("video");
    assert_eq!(serde_json::to_string(&name).unwrap(), "\"video\"");
}
