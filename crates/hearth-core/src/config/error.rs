//! # Hearth Configuration Errors
//!
//! Defines [`ConfigError`], covering schema violations, dotted keys that
//! traverse non-object values, and configuration files that cannot be parsed.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config key '{key}' expects {expected}, got {found}")]
    SchemaViolation {
        key: String,
        expected: String,
        found: String,
    },

    #[error("Config key '{key}' cannot be set: '{blocked_at}' is not an object")]
    NotAnObject { key: String, blocked_at: String },

    #[error("Config key must not be empty")]
    EmptyKey,

    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Deserialization from '{format}' failed for '{path}': {message}")]
    Deserialization {
        format: String,
        path: PathBuf,
        message: String,
    },

    #[error("Serialization to '{format}' failed: {message}")]
    Serialization { format: String, message: String },

    #[error("Config value for '{key}' could not be converted: {message}")]
    Conversion { key: String, message: String },
}
