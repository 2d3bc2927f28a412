//! Core error types for goalgrid-core.
//!
//! Scoring functions are pure, so every error here signals bad input from the
//! calling layer: an unknown timezone, a goal that was never validated, or a
//! malformed key. Nothing is retried and nothing is defaulted.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for goalgrid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timezone identifier is not a known IANA zone
    #[error("Invalid timezone: '{0}' is not a recognized IANA timezone")]
    InvalidTimezone(String),

    /// Goal or scoring parameters violate a required constraint
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfiguration { field: String, message: String },

    /// Date or week key text could not be parsed
    #[error("Invalid {kind} key: '{value}'")]
    InvalidKey { kind: KeyKind, value: String },

    /// Configuration file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which calendar key failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Date,
    Week,
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyKind::Date => f.write_str("date"),
            KeyKind::Week => f.write_str("week"),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

impl CoreError {
    pub(crate) fn invalid_config(field: &str, message: impl Into<String>) -> Self {
        CoreError::InvalidConfiguration {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
