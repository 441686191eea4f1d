//! Error types for vidmod-core

use thiserror::Error;

/// Core error type for vidmod
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Target not declared in the configuration
    #[error("[C004] Unknown target '{target}'. Available targets: {available}")]
    UnknownTarget { target: String, available: String },

    /// C005: Step versions are not strictly increasing
    #[error("[C005] Component '{component}': step {version} must be greater than {previous}")]
    StepOrder {
        component: String,
        version: i64,
        previous: i64,
    },

    /// C006: Step declares no operations
    #[error("[C006] Component '{component}': step {version} has no operations")]
    EmptyStep { component: String, version: i64 },

    /// C007: Baseline declares the same table twice
    #[error("[C007] Component '{component}': baseline table '{table}' declared twice")]
    DuplicateBaselineTable { component: String, table: String },

    /// C008: IO error with file path context
    #[error("[C008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}
