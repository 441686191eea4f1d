//! Runtime context for CLI commands

use anyhow::{bail, Context, Result};
use std::path::Path;
use vidmod_core::{ComponentName, Config};
use vidmod_db::DuckDbBackend;
use vidmod_migrate::{Migrator, Registry};

use crate::cli::GlobalArgs;

/// Runtime context containing loaded config, backend and component registry
pub(crate) struct RuntimeContext {
    /// The loaded site configuration
    pub config: Config,

    /// Schema backend for the selected target
    pub backend: DuckDbBackend,

    /// Known components
    pub registry: Registry,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let config = load_config(args)?;

        let target = Config::resolve_target(args.target.as_deref());
        let mut database = config
            .database_for(target.as_deref())
            .context("Failed to resolve database target")?;
        if let Some(path) = &args.database {
            database.path = path.clone();
        }

        log::info!(
            "Opening {} (site '{}', target {})",
            database.path,
            config.name,
            target.as_deref().unwrap_or("default")
        );
        let backend = DuckDbBackend::new(&database.path)
            .with_context(|| format!("Failed to open database {}", database.path))?
            .with_table_prefix(database.table_prefix.clone());

        let registry = Registry::builtin().context("Failed to load component catalog")?;

        Ok(Self {
            config,
            backend,
            registry,
        })
    }

    /// Migrator over this context's backend and registry
    pub fn migrator(&self) -> Migrator<'_, DuckDbBackend> {
        Migrator::new(&self.backend, &self.registry)
    }

    /// Resolve the components a command should act on.
    ///
    /// Priority: explicit `--component` flags > `components` in vidmod.yml >
    /// every registered component. Unknown names are rejected up front.
    pub fn select_components(&self, requested: &[String]) -> Result<Vec<ComponentName>> {
        let names: Vec<String> = if !requested.is_empty() {
            requested.to_vec()
        } else if !self.config.components.is_empty() {
            self.config
                .components
                .iter()
                .map(|c| c.to_string())
                .collect()
        } else {
            self.registry
                .components()
                .iter()
                .map(|c| c.name().to_string())
                .collect()
        };

        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let component = self.registry.get(&name)?;
            if !selected.contains(component.name()) {
                selected.push(component.name().clone());
            }
        }
        if selected.is_empty() {
            bail!("No components selected");
        }
        Ok(selected)
    }
}

/// Load config from a custom path or the project directory
fn load_config(args: &GlobalArgs) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load(Path::new(path)).context("Failed to load configuration file"),
        None => Config::load_from_dir(Path::new(&args.project_dir))
            .context("Failed to load site configuration"),
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
