//! # Hearth Storage
//!
//! Named disks for application files. A disk is any [`StorageProvider`];
//! [`LocalStorageProvider`] maps relative paths onto a directory and writes
//! atomically through a temp file. [`StorageManager`] holds the mounted disks.
pub mod error;
pub mod local;
pub mod manager;
pub mod provider;

pub use error::StorageSystemError;
pub use local::LocalStorageProvider;
pub use manager::{DiskConfig, StorageManager, DEFAULT_DISK};
pub use provider::StorageProvider;
