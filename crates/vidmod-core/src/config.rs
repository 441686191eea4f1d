//! Configuration types and parsing for vidmod.yml

use crate::error::{CoreError, CoreResult};
use crate::names::ComponentName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Config file names searched by [`Config::load_from_dir`], in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["vidmod.yml", "vidmod.yaml"];

/// Main project configuration from vidmod.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Site name, used in log and status output
    pub name: String,

    /// Database connection configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Components to migrate (empty means every catalog component)
    #[serde(default)]
    pub components: Vec<ComponentName>,

    /// Named target configurations (e.g., dev, staging, prod)
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Database configuration override
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
}

/// Database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, or `:memory:`
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Prefix applied to every physical table name (e.g. `mdl_`)
    #[serde(default)]
    pub table_prefix: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            table_prefix: String::new(),
        }
    }
}

fn default_db_path() -> String {
    ":memory:".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for vidmod.yml or vidmod.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            if candidate.exists() {
                return Self::load(&candidate);
            }
        }
        Err(CoreError::ConfigNotFound {
            path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Site name cannot be empty".to_string(),
            });
        }

        let databases = std::iter::once(&self.database)
            .chain(self.targets.values().filter_map(|t| t.database.as_ref()));
        for db in databases {
            if db.path.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: "database.path cannot be empty".to_string(),
                });
            }
            if !db
                .table_prefix
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_')
            {
                return Err(CoreError::ConfigInvalid {
                    message: format!(
                        "database.table_prefix '{}' may only contain [A-Za-z0-9_]",
                        db.table_prefix
                    ),
                });
            }
        }
        Ok(())
    }

    /// Get all available target names
    pub fn available_targets(&self) -> Vec<&str> {
        self.targets.keys().map(|s| s.as_str()).collect()
    }

    /// Get database configuration, optionally applying target overrides
    ///
    /// If target is specified and exists, uses target's database config.
    /// Otherwise, uses the base database config.
    pub fn database_for(&self, target: Option<&str>) -> CoreResult<DatabaseConfig> {
        match target {
            Some(name) => {
                let target_config =
                    self.targets
                        .get(name)
                        .ok_or_else(|| CoreError::UnknownTarget {
                            target: name.to_string(),
                            available: self.available_targets().join(", "),
                        })?;
                Ok(target_config
                    .database
                    .clone()
                    .unwrap_or_else(|| self.database.clone()))
            }
            None => Ok(self.database.clone()),
        }
    }

    /// Resolve target from CLI flag or VIDMOD_TARGET environment variable
    ///
    /// Priority: CLI flag > VIDMOD_TARGET env var > None
    pub fn resolve_target(cli_target: Option<&str>) -> Option<String> {
        cli_target
            .map(String::from)
            .or_else(|| std::env::var("VIDMOD_TARGET").ok())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
