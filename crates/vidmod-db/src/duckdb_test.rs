use super::*;

fn video_table() -> TableSpec {
    TableSpec::new(
        "video",
        vec![
            ColumnSpec::integer("id", 10).not_null(),
            ColumnSpec::char("type", 20).default_value("vimeo"),
            ColumnSpec::text("url"),
        ],
    )
}

fn backend() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.create_table(&video_table()).unwrap();
    db
}

fn video() -> TableName {
    TableName::new("video")
}

#[test]
fn test_in_memory() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    assert_eq!(db.backend_type(), "duckdb");
    assert!(!db.table_exists(&video()).unwrap());
}

#[test]
fn test_create_table() {
    let db = backend();
    assert!(db.table_exists(&video()).unwrap());
    let err = db.create_table(&video_table()).unwrap_err();
    assert!(matches!(err, DbError::TableExists(_)));
}

#[test]
fn test_table_prefix() {
    let db = DuckDbBackend::in_memory().unwrap().with_table_prefix("mdl_");
    db.create_table(&video_table()).unwrap();
    assert!(db.table_exists(&video()).unwrap());
    let count: i64 = db
        .conn()
        .query_row(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = 'mdl_video'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_add_column_with_default_and_not_null() {
    let db = backend();
    db.conn()
        .execute("INSERT INTO video (id) VALUES (1)", [])
        .unwrap();

    let spec = ColumnSpec::integer("debug", 1)
        .not_null()
        .default_value("0")
        .after("type");
    db.add_column(&video(), &spec).unwrap();
    assert!(db.column_exists(&video(), &ColumnName::new("debug")).unwrap());

    let cols = db.table_columns(&video()).unwrap();
    let debug = cols.iter().find(|c| c.name == "debug").unwrap();
    assert_eq!(debug.data_type, "SMALLINT");
    assert!(!debug.nullable);

    // Existing rows pick up the default.
    let value: i64 = db
        .conn()
        .query_row("SELECT debug FROM video WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(value, 0);
}

#[test]
fn test_add_column_missing_table() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db
        .add_column(&video(), &ColumnSpec::text("intro"))
        .unwrap_err();
    assert!(matches!(err, DbError::TableNotFound(_)));
}

#[test]
fn test_drop_column() {
    let db = backend();
    db.drop_column(&video(), &ColumnName::new("url")).unwrap();
    assert!(!db.column_exists(&video(), &ColumnName::new("url")).unwrap());

    let err = db.drop_column(&video(), &ColumnName::new("url")).unwrap_err();
    assert!(matches!(err, DbError::ColumnNotFound { .. }));
}

#[test]
fn test_rename_column() {
    let db = backend();
    db.rename_column(&video(), &ColumnName::new("url"), &ColumnName::new("externalurl"))
        .unwrap();
    assert!(db
        .column_exists(&video(), &ColumnName::new("externalurl"))
        .unwrap());

    let err = db
        .rename_column(&video(), &ColumnName::new("url"), &ColumnName::new("other"))
        .unwrap_err();
    assert!(matches!(err, DbError::ColumnNotFound { .. }));
}

#[test]
fn test_set_and_drop_default() {
    let db = backend();
    db.add_column(
        &video(),
        &ColumnSpec::integer("resume", 1).not_null().default_value("0"),
    )
    .unwrap();
    db.set_column_default(&video(), &ColumnName::new("resume"), Some("1"))
        .unwrap();

    db.conn()
        .execute("INSERT INTO video (id) VALUES (7)", [])
        .unwrap();
    let resume: i64 = db
        .conn()
        .query_row("SELECT resume FROM video WHERE id = 7", [], |row| row.get(0))
        .unwrap();
    assert_eq!(resume, 1);

    db.set_column_default(&video(), &ColumnName::new("type"), None)
        .unwrap();
    let cols = db.table_columns(&video()).unwrap();
    let ty = cols.iter().find(|c| c.name == "type").unwrap();
    assert!(ty.default.is_none());
}

#[test]
fn test_set_default_missing_column() {
    let db = backend();
    let err = db
        .set_column_default(&video(), &ColumnName::new("nope"), Some("1"))
        .unwrap_err();
    assert!(matches!(err, DbError::ColumnNotFound { .. }));
}

#[test]
fn test_installed_version_round_trip() {
    let db = DuckDbBackend::in_memory().unwrap();
    let component = ComponentName::new("video");
    assert_eq!(db.installed_version(&component).unwrap(), SchemaVersion::NONE);

    db.set_installed_version(&component, SchemaVersion::new(2022060600))
        .unwrap();
    db.set_installed_version(&component, SchemaVersion::new(2022061200))
        .unwrap();
    assert_eq!(
        db.installed_version(&component).unwrap(),
        SchemaVersion::new(2022061200)
    );

    let history = db.version_history(Some(&component)).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].version, SchemaVersion::new(2022061200));
    assert!(db
        .version_history(Some(&ComponentName::new("other")))
        .unwrap()
        .is_empty());
}

#[test]
fn test_versions_persist_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.duckdb");
    let component = ComponentName::new("video");
    {
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.set_installed_version(&component, SchemaVersion::new(42))
            .unwrap();
    }
    let db = DuckDbBackend::from_path(&path).unwrap();
    assert_eq!(
        db.installed_version(&component).unwrap(),
        SchemaVersion::new(42)
    );
    assert_eq!(db.version_history(None).unwrap().len(), 1);
}

#[test]
fn test_sql_type_mapping() {
    assert_eq!(sql_type(&ColumnSpec::integer("a", 1)), "SMALLINT");
    assert_eq!(sql_type(&ColumnSpec::integer("a", 9)), "INTEGER");
    assert_eq!(sql_type(&ColumnSpec::integer("a", 10)), "BIGINT");
    assert_eq!(sql_type(&ColumnSpec::char("a", 100)), "VARCHAR(100)");
    assert_eq!(sql_type(&ColumnSpec::text("a")), "VARCHAR");
}

#[test]
fn test_sql_literal_quotes_non_numeric() {
    assert_eq!(sql_literal("0", false), "0");
    assert_eq!(sql_literal("vimeo", true), "'vimeo'");
    assert_eq!(sql_literal("1; DROP TABLE x", false), "'1; DROP TABLE x'");
    assert_eq!(sql_literal("it's", true), "'it''s'");
}
