//! # Hearth Storage System Errors
//!
//! Defines [`StorageSystemError`], the error enum of the storage subsystem:
//! file I/O failures with their operation and path, unknown disks, and paths
//! that would escape a disk's root.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageSystemError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Disk '{0}' is not mounted")]
    DiskNotFound(String),

    #[error("Disk '{disk}' uses unsupported driver '{driver}'")]
    UnsupportedDriver { disk: String, driver: String },

    #[error("Invalid path provided: '{path}': {reason}")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Storage operation '{operation}' failed for path '{path}': {message}")]
    OperationFailed {
        operation: String,
        path: PathBuf,
        message: String,
    },
}

// Helper for creating Io errors, ensuring path is always included.
impl StorageSystemError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StorageSystemError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }
}
