use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Deserialize;

use crate::config::Configurator;
use crate::container::Service;
use crate::kernel::constants::STORAGE_DIR;
use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::provider::StorageProvider;

/// Name of the disk mounted when nothing else is configured.
pub const DEFAULT_DISK: &str = "local";

/// One entry of `filesystem.disks`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiskConfig {
    #[serde(default = "default_driver")]
    pub driver: String,
    /// Disk root; relative roots are resolved against the application base path.
    pub root: Option<PathBuf>,
}

fn default_driver() -> String {
    "local".to_string()
}

/// Named disks, each backed by a [`StorageProvider`].
pub struct StorageManager {
    disks: RwLock<BTreeMap<String, Arc<dyn StorageProvider>>>,
    default_disk: String,
}

impl Service for StorageManager {
    const ID: &'static str = "hearth.storage";
}

impl StorageManager {
    /// A manager with a single `local` disk rooted at `<base_path>/storage`.
    pub fn new(base_path: &Path) -> Self {
        let manager = Self {
            disks: RwLock::new(BTreeMap::new()),
            default_disk: DEFAULT_DISK.to_string(),
        };
        manager.mount(
            DEFAULT_DISK,
            Arc::new(LocalStorageProvider::new(base_path.join(STORAGE_DIR))),
        );
        manager
    }

    /// Build the manager from `filesystem.disks` and `filesystem.default`.
    ///
    /// Configured disks are mounted over the built-in `local` disk, so a
    /// `local` entry replaces it.
    pub fn from_config(base_path: &Path, config: &Configurator) -> Result<Self> {
        let mut manager = Self::new(base_path);
        if let Some(default) = config.get_str("filesystem.default") {
            manager.default_disk = default;
        }

        let disks: BTreeMap<String, DiskConfig> = config.get_as("filesystem.disks").unwrap_or_default();
        for (name, disk) in disks {
            if disk.driver != "local" {
                return Err(StorageSystemError::UnsupportedDriver {
                    disk: name,
                    driver: disk.driver,
                }
                .into());
            }
            let root = match disk.root {
                Some(root) if root.is_absolute() => root,
                Some(root) => base_path.join(root),
                None => base_path.join(STORAGE_DIR).join(&name),
            };
            log::debug!("Mounting disk '{}' at {}", name, root.display());
            manager.mount(&name, Arc::new(LocalStorageProvider::new(root)));
        }

        Ok(manager)
    }

    /// Mount (or replace) a disk.
    pub fn mount(&self, name: &str, provider: Arc<dyn StorageProvider>) {
        self.disks.write().insert(name.to_string(), provider);
    }

    pub fn disk(&self, name: &str) -> Result<Arc<dyn StorageProvider>> {
        self.disks
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageSystemError::DiskNotFound(name.to_string()).into())
    }

    pub fn default_disk(&self) -> Result<Arc<dyn StorageProvider>> {
        self.disk(&self.default_disk)
    }

    pub fn default_disk_name(&self) -> &str {
        &self.default_disk
    }

    /// Mounted disk names, sorted.
    pub fn disks(&self) -> Vec<String> {
        self.disks.read().keys().cloned().collect()
    }
}

impl fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageManager")
            .field("disks", &self.disks())
            .field("default_disk", &self.default_disk)
            .finish()
    }
}
