//! # Hearth Environment Errors
//!
//! Defines [`EnvError`], raised when an environment file exists but cannot
//! be read or parsed. A missing file is not an error.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Failed to parse environment file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}
