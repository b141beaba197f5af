use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::error::ConfigError;
use crate::config::format::ConfigFormat;
use crate::config::schema::{kind_of, Expect};
use crate::container::Service;
use crate::kernel::error::{Error, Result};
use crate::utils::fs::find_config_files;

/// Configuration store addressed by dotted keys (`"database.connections.main"`).
///
/// Values live in a single `serde_json::Value` object tree. Keys registered
/// with [`Configurator::add_schema`] are type-checked on every write.
#[derive(Debug)]
pub struct Configurator {
    values: RwLock<Value>,
    schema: RwLock<BTreeMap<String, Expect>>,
}

impl Service for Configurator {
    const ID: &'static str = "hearth.config";
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new()
    }
}

impl Configurator {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self {
            values: RwLock::new(Value::Object(Map::new())),
            schema: RwLock::new(BTreeMap::new()),
        }
    }

    /// Declare the expected kind of `key`. Existing values are not re-checked.
    pub fn add_schema(&self, key: impl Into<String>, expect: Expect) {
        self.schema.write().insert(key.into(), expect);
    }

    pub fn schema_for(&self, key: &str) -> Option<Expect> {
        self.schema.read().get(key).copied()
    }

    /// Get a configuration value
    pub fn get(&self, key: &str) -> Option<Value> {
        lookup(&self.values.read(), key).cloned()
    }

    /// Get a value converted to `T`. Missing or unconvertible values yield `None`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .filter(|v| !v.is_null())
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// Get a configuration value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_as(key).unwrap_or(default)
    }

    /// Get a non-empty string value
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.get_as::<String>(key).filter(|s| !s.is_empty())
    }

    /// Check if key exists (a stored `null` counts)
    pub fn has(&self, key: &str) -> bool {
        lookup(&self.values.read(), key).is_some()
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&self, key: &str, value: T) -> Result<()> {
        let value = to_value(key, value)?;
        self.validate(key, &value)?;
        insert(&mut self.values.write(), key, value)
    }

    /// Set many values at once. Nothing is written if any entry fails.
    pub fn set_many<I, K>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let entries: Vec<(String, Value)> = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        for (key, value) in &entries {
            self.validate(key, value)?;
        }

        let mut values = self.values.write();
        let mut staged = values.clone();
        for (key, value) in entries {
            insert(&mut staged, &key, value)?;
        }
        *values = staged;
        Ok(())
    }

    /// Remove a configuration value
    pub fn remove(&self, key: &str) -> Option<Value> {
        let mut values = self.values.write();
        let (parent, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (lookup_mut(&mut *values, parent)?, leaf),
            None => (&mut *values, key),
        };
        parent.as_object_mut()?.remove(leaf)
    }

    /// Snapshot of the whole tree
    pub fn all(&self) -> Value {
        self.values.read().clone()
    }

    /// Top-level keys, sorted
    pub fn keys(&self) -> Vec<String> {
        match &*self.values.read() {
            Value::Object(map) => {
                let mut keys: Vec<String> = map.keys().cloned().collect();
                keys.sort();
                keys
            }
            _ => Vec::new(),
        }
    }

    /// Load one file as the section named after its stem.
    pub fn load_file(&self, path: &Path) -> Result<()> {
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
        let section = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;

        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(e, "read_config", path.to_path_buf()))?;
        let value = format.parse(&content, path)?;

        log::debug!("Loaded config section '{}' from {}", section, path.display());
        self.set(section, value)
    }

    /// Load every supported file in `dir`. A missing directory loads nothing.
    pub fn load_dir(&self, dir: &Path) -> Result<usize> {
        let files = find_config_files(dir)
            .map_err(|e| Error::io(e, "read_config_dir", dir.to_path_buf()))?;
        for file in &files {
            self.load_file(file)?;
        }
        Ok(files.len())
    }

    fn validate(&self, key: &str, value: &Value) -> Result<()> {
        let schema = self.schema.read();
        for (schema_key, expect) in schema.iter() {
            let candidate = if schema_key == key {
                Some(value)
            } else if let Some(rest) = schema_key.strip_prefix(key).and_then(|r| r.strip_prefix('.')) {
                lookup(value, rest)
            } else {
                None
            };

            if let Some(candidate) = candidate {
                if !expect.accepts(candidate) {
                    return Err(ConfigError::SchemaViolation {
                        key: schema_key.clone(),
                        expected: expect.to_string(),
                        found: kind_of(candidate).to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(())
    }
}

fn to_value<T: Serialize>(key: &str, value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        ConfigError::Conversion {
            key: key.to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

fn lookup<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(root, |node, segment| node.as_object()?.get(segment))
}

fn lookup_mut<'a>(root: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    key.split('.').try_fold(root, |node, segment| node.as_object_mut()?.get_mut(segment))
}

fn insert(root: &mut Value, key: &str, value: Value) -> Result<()> {
    if key.is_empty() {
        return Err(ConfigError::EmptyKey.into());
    }

    let mut node = root;
    let mut walked = String::new();
    let mut segments = key.split('.').peekable();

    while let Some(segment) = segments.next() {
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(segment);

        let map = node.as_object_mut().ok_or_else(|| ConfigError::NotAnObject {
            key: key.to_string(),
            blocked_at: walked.clone(),
        })?;

        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return Ok(());
        }

        node = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !node.is_object() {
            return Err(ConfigError::NotAnObject {
                key: key.to_string(),
                blocked_at: walked,
            }
            .into());
        }
    }
    Ok(())
}
