//! # Hearth Environment
//!
//! Loads `KEY=VALUE` pairs from the project's `.env` file into a read-only
//! [`Env`] lookup. Loading is immutable: variables already present in the
//! process environment win over file values, and the process environment is
//! never modified.
pub mod error;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::container::Service;
use crate::kernel::constants::ENV_FILE;
use crate::kernel::error::Result;

pub use error::EnvError;

/// Read-only environment lookup.
#[derive(Debug, Clone, Default)]
pub struct Env {
    values: BTreeMap<String, String>,
    source: Option<PathBuf>,
    process_fallback: bool,
}

impl Service for Env {
    const ID: &'static str = "hearth.env";
}

impl Env {
    /// Load `<base_path>/.env`. A missing file yields an empty lookup backed by
    /// the process environment.
    pub fn load(base_path: &Path) -> Result<Self> {
        Self::load_file(&base_path.join(ENV_FILE))
    }

    /// Load a specific env file. A missing file is not an error.
    pub fn load_file(path: &Path) -> Result<Self> {
        let mut env = Env {
            values: BTreeMap::new(),
            source: None,
            process_fallback: true,
        };

        if !path.is_file() {
            log::debug!("No environment file at {}, skipping", path.display());
            return Ok(env);
        }

        let parse_error = |message: String| EnvError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let iter = dotenvy::from_path_iter(path).map_err(|e| parse_error(e.to_string()))?;
        for item in iter {
            let (key, value) = item.map_err(|e| parse_error(e.to_string()))?;
            env.values.insert(key, value);
        }

        log::debug!("Loaded {} variables from {}", env.values.len(), path.display());
        env.source = Some(path.to_path_buf());
        Ok(env)
    }

    /// An isolated lookup that never consults the process environment.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Env {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            source: None,
            process_fallback: false,
        }
    }

    /// Look up a variable. The process environment wins when fallback is enabled.
    pub fn get(&self, key: &str) -> Option<String> {
        if self.process_fallback {
            if let Ok(value) = std::env::var(key) {
                return Some(value);
            }
        }
        self.values.get(key).cloned()
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Interpret a variable as a boolean (`true/1/yes/on`, `false/0/no/off`).
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)?.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" | "" => Some(false),
            _ => None,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys read from the env file (or given to `from_pairs`), sorted.
    pub fn file_keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// The file the values were read from, if one existed.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests;
