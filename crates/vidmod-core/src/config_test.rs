use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("name: site").unwrap();
    assert_eq!(config.name, "site");
    assert_eq!(config.database.path, ":memory:");
    assert!(config.database.table_prefix.is_empty());
    assert!(config.components.is_empty());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: moodle_site
database:
  path: "./site.duckdb"
  table_prefix: "mdl_"
components: [video]
targets:
  prod:
    database:
      path: "/srv/site.duckdb"
      table_prefix: "mdl_"
  dev: {}
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.components, vec![ComponentName::new("video")]);
    assert_eq!(config.available_targets(), vec!["dev", "prod"]);

    let prod = config.database_for(Some("prod")).unwrap();
    assert_eq!(prod.path, "/srv/site.duckdb");

    // dev declares no database, so it falls back to the base config
    let dev = config.database_for(Some("dev")).unwrap();
    assert_eq!(dev.path, "./site.duckdb");
    assert_eq!(config.database_for(None).unwrap(), config.database);
}

#[test]
fn test_unknown_target() {
    let config: Config = serde_yaml::from_str("name: site").unwrap();
    let err = config.database_for(Some("staging")).unwrap_err();
    assert!(matches!(err, CoreError::UnknownTarget { .. }));
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("name: site\nmaterialization: view");
    assert!(result.is_err());
}

#[test]
fn test_load_from_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("vidmod.yml"), "name: site\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "site");
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("vidmod.yaml"), "name: other\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "other");
}

#[test]
fn test_load_missing_config() {
    let dir = tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_empty_name_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vidmod.yml");
    fs::write(&path, "name: \"\"\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_bad_table_prefix_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vidmod.yml");
    fs::write(&path, "name: site\ndatabase:\n  table_prefix: \"mdl-\"\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("table_prefix"));
}

#[test]
fn test_malformed_yaml_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("vidmod.yml");
    fs::write(&path, "name: [unterminated\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigParseError { .. }));
}
