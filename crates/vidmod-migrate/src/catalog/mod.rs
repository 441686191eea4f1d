//! Built-in component catalog.

mod video;

use crate::error::MigrateResult;
use vidmod_core::Component;

pub use video::video;

/// Every built-in component.
pub fn builtin() -> MigrateResult<Vec<Component>> {
    Ok(vec![video()?])
}

/// Look up a built-in component by name.
pub fn find(name: &str) -> MigrateResult<Option<Component>> {
    Ok(builtin()?.into_iter().find(|c| c.name() == name))
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
