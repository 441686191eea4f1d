//! Schema version ordinal.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version of a component's schema.
///
/// Versions are plain ordinals (the catalog uses `YYYYMMDDNN` dates). The
/// value `0` means the component has never been installed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SchemaVersion(i64);

impl SchemaVersion {
    /// The "never installed" version.
    pub const NONE: SchemaVersion = SchemaVersion(0);

    /// Wrap a raw version number.
    pub const fn new(version: i64) -> Self {
        Self(version)
    }

    /// Return the raw version number.
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Whether this is the "never installed" version.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SchemaVersion {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

impl std::str::FromStr for SchemaVersion {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
