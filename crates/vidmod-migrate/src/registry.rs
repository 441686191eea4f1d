//! Lookup of components by name.

use crate::catalog;
use crate::error::{MigrateResult, MigrationError};
use vidmod_core::Component;

/// Set of known components, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    components: Vec<Component>,
}

impl Registry {
    /// Registry over an explicit component list.
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    /// Registry over every built-in catalog component.
    pub fn builtin() -> MigrateResult<Self> {
        Ok(Self::new(catalog::builtin()?))
    }

    /// Look up a component by name.
    pub fn get(&self, name: &str) -> MigrateResult<&Component> {
        self.components
            .iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| MigrationError::UnknownComponent {
                component: name.to_string(),
            })
    }

    /// All components in registration order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }
}
