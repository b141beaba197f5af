use std::collections::BTreeMap;

use parking_lot::RwLock;
use serde::Deserialize;

use crate::config::Configurator;
use crate::container::Service;
use crate::kernel::error::Result;
use crate::services::error::ServiceError;

const DEFAULT_ASSET_DIR: &str = "assets";

/// The `asset` configuration section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetConfig {
    /// Absolute base URL; overrides `<app_url>/<dir>`.
    pub url: Option<String>,
    pub dir: Option<String>,
    /// Named assets, name -> path below the base URL.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

/// Resolves public URLs of named assets.
#[derive(Debug)]
pub struct AssetManager {
    base_url: String,
    entries: RwLock<BTreeMap<String, String>>,
}

impl Service for AssetManager {
    const ID: &'static str = "hearth.asset";
}

impl AssetManager {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Base URL from `asset.url`, else `<app_url>/<asset.dir>`.
    pub fn from_config(config: &Configurator) -> Self {
        let section: AssetConfig = config.get_as("asset").unwrap_or_default();
        let base_url = match section.url.filter(|u| !u.is_empty()) {
            Some(url) => url,
            None => {
                let app_url = config.get_str("app_url").unwrap_or_default();
                let dir = section
                    .dir
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| DEFAULT_ASSET_DIR.to_string());
                format!("{}/{}", app_url.trim_end_matches('/'), dir.trim_matches('/'))
            }
        };
        Self::new(base_url)
    }

    /// Register the named assets listed under `asset.entries`.
    pub fn load_entries(&self, config: &Configurator) -> usize {
        let entries: BTreeMap<String, String> = config.get_as("asset.entries").unwrap_or_default();
        let count = entries.len();
        self.entries.write().extend(entries);
        count
    }

    pub fn register(&self, name: impl Into<String>, path: impl Into<String>) {
        self.entries.write().insert(name.into(), path.into());
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a registered asset.
    pub fn url(&self, name: &str) -> Result<String> {
        let path = self
            .entries
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceError::UnknownAsset(name.to_string()))?;
        Ok(self.url_for(&path))
    }

    /// URL of an arbitrary path below the base URL. Absolute URLs are returned as is.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Registered asset names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}
