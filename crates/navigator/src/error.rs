//! Error types for the navigator

use thiserror::Error;

/// Result type alias using the navigator error
pub type NavResult<T> = std::result::Result<T, NavError>;

/// Hard failures that escape a search.
///
/// Dead ends and exhausted budgets are not errors; they come back as a
/// negative outcome.
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Tree surface error: {0}")]
    Surface(String),

    #[error("Surface operation '{operation}' timed out after {ms}ms")]
    Timeout { operation: String, ms: u64 },

    #[error("Search state invariant violated: {0}")]
    Invariant(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("YAML error")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error")]
    TomlSer(#[from] toml::ser::Error),
}

impl NavError {
    /// Shorthand used by surface implementations
    pub fn surface(msg: impl Into<String>) -> Self {
        NavError::Surface(msg.into())
    }
}
