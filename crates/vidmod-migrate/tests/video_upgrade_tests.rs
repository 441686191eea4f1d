//! End-to-end upgrades of the built-in `video` component against DuckDB.

use vidmod_core::{ColumnName, ComponentName, SchemaVersion, TableName};
use vidmod_db::{DuckDbBackend, SchemaBackend};
use vidmod_migrate::{catalog, MigrationErrorKind, Migrator, Registry};

// ── Helpers ────────────────────────────────────────────────────────────

fn registry() -> Registry {
    Registry::builtin().unwrap()
}

fn video() -> ComponentName {
    ComponentName::new("video")
}

fn columns(db: &DuckDbBackend, table: &str) -> Vec<String> {
    db.table_columns(&TableName::new(table))
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect()
}

fn has_column(db: &DuckDbBackend, table: &str, column: &str) -> bool {
    db.column_exists(&TableName::new(table), &ColumnName::new(column))
        .unwrap()
}

// ── Tests ──────────────────────────────────────────────────────────────

#[test]
fn fresh_install_reaches_latest_version() {
    let registry = registry();
    let db = DuckDbBackend::in_memory().unwrap();
    let summary = Migrator::new(&db, &registry).upgrade(&video()).unwrap();

    let latest = catalog::video().unwrap().latest_version();
    assert_eq!(summary.to, latest);
    assert_eq!(summary.applied.len(), 11);
    assert_eq!(db.installed_version(&video()).unwrap(), latest);

    for column in [
        "youtubeurl",
        "vimeourl",
        "externalurl",
        "youtubeid",
        "vimeoid",
        "videoid",
        "debug",
        "controls",
        "autoplay",
        "disablecontextmenu",
        "hidecontrols",
        "fullscreenenabled",
        "loopvideo",
        "preventforwardseeking",
        "completiononplay",
        "completiononpercent",
        "completionpercent",
        "completiononviewtime",
        "completionviewtime",
        "resume",
    ] {
        assert!(has_column(&db, "video", column), "missing video.{column}");
    }
    for gone in ["url", "loop", "preventfowardseeking"] {
        assert!(!has_column(&db, "video", gone), "video.{gone} should be gone");
    }
    assert!(has_column(&db, "video_session", "usermodified"));
    assert!(has_column(&db, "video_session", "timemodified"));
}

#[test]
fn resume_default_is_one_after_upgrade() {
    let registry = registry();
    let db = DuckDbBackend::in_memory().unwrap();
    Migrator::new(&db, &registry).upgrade(&video()).unwrap();

    db.conn()
        .execute("INSERT INTO video (id, name) VALUES (1, 'intro')", [])
        .unwrap();
    let resume: i64 = db
        .conn()
        .query_row("SELECT resume FROM video WHERE id = 1", [], |row| row.get(0))
        .unwrap();
    assert_eq!(resume, 1);
}

#[test]
fn second_upgrade_is_noop() {
    let registry = registry();
    let db = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&db, &registry);
    migrator.upgrade(&video()).unwrap();
    let before = columns(&db, "video");

    let summary = migrator.upgrade(&video()).unwrap();
    assert!(summary.is_noop());
    assert_eq!(summary.from, summary.to);
    assert_eq!(columns(&db, "video"), before);
}

#[test]
fn upgrade_from_recorded_intermediate_version() {
    let registry = registry();
    let db = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&db, &registry);
    let component = registry.get("video").unwrap();
    let release = SchemaVersion::new(2022061600);

    // Lay the site out as the 2022061600 release left it.
    migrator.install_baseline(component).unwrap();
    for step in component.steps().iter().filter(|s| s.version <= release) {
        for op in &step.operations {
            migrator.apply_operation(&video(), step.version, op).unwrap();
        }
    }
    db.set_installed_version(&video(), release).unwrap();
    assert!(has_column(&db, "video", "loop"));

    let summary = migrator.upgrade(&video()).unwrap();
    assert_eq!(summary.from, release);
    assert_eq!(summary.applied.len(), 7);
    assert_eq!(summary.applied[0], SchemaVersion::new(2022061601));
    assert!(has_column(&db, "video", "loopvideo"));
    assert!(!has_column(&db, "video", "loop"));
    assert!(migrator.status(&video()).unwrap().is_current());
}

#[test]
fn plan_from_loop_release_starts_with_rename() {
    let registry = registry();
    let db = DuckDbBackend::in_memory().unwrap();
    let plan = Migrator::new(&db, &registry)
        .plan(&video(), SchemaVersion::new(2022061600))
        .unwrap();
    assert_eq!(plan[0].version, SchemaVersion::new(2022061601));
    assert_eq!(
        plan[0].operations[0].describe(),
        "rename column video.loop to loopvideo"
    );
    assert_eq!(plan.len(), 7);
}

#[test]
fn lost_rename_checkpoint_fails_on_retry() {
    let registry = registry();
    let db = DuckDbBackend::in_memory().unwrap();
    let migrator = Migrator::new(&db, &registry);
    migrator.upgrade(&video()).unwrap();

    // Pretend the checkpoint after the loop rename never landed.
    db.set_installed_version(&video(), SchemaVersion::new(2022061600))
        .unwrap();
    let err = migrator.upgrade(&video()).unwrap_err();
    assert_eq!(err.kind(), MigrationErrorKind::Operation);
    assert_eq!(err.step_version(), Some(SchemaVersion::new(2022061601)));
    assert_eq!(
        db.installed_version(&video()).unwrap(),
        SchemaVersion::new(2022061600)
    );
}

#[test]
fn prefixed_tables_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.duckdb");
    let registry = registry();
    {
        let db = DuckDbBackend::from_path(&path)
            .unwrap()
            .with_table_prefix("mdl_");
        Migrator::new(&db, &registry).upgrade(&video()).unwrap();
    }

    let db = DuckDbBackend::from_path(&path)
        .unwrap()
        .with_table_prefix("mdl_");
    assert_eq!(db.physical_name(&TableName::new("video")), "mdl_video");
    assert!(has_column(&db, "video", "resume"));
    let summary = Migrator::new(&db, &registry).upgrade(&video()).unwrap();
    assert!(summary.is_noop());
}
