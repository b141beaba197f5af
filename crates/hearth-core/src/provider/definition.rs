use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::kernel::error::Result;
use crate::provider::builtin;
use crate::provider::error::ProviderError;
use crate::provider::traits::ServiceProvider;

/// Zero-argument provider constructor.
pub type ProviderConstructor = Arc<dyn Fn() -> Result<Arc<dyn ServiceProvider>> + Send + Sync>;

/// How a provider is named in the boot list.
#[derive(Clone)]
pub enum ProviderDefinition {
    /// A catalog name, instantiated with no arguments.
    Named(String),
    /// An already constructed provider.
    Instance(Arc<dyn ServiceProvider>),
}

impl ProviderDefinition {
    /// Read a definition from a config entry. Only strings are accepted.
    pub fn from_config_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(ProviderDefinition::Named(name.clone())),
            other => Err(ProviderError::UnsupportedDefinition {
                definition: other.to_string(),
            }
            .into()),
        }
    }

    /// Resolve the definition to a provider instance.
    pub fn instantiate(&self, catalog: &ProviderCatalog) -> Result<Arc<dyn ServiceProvider>> {
        match self {
            ProviderDefinition::Named(name) => catalog.instantiate(name),
            ProviderDefinition::Instance(provider) => Ok(provider.clone()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ProviderDefinition::Named(name) => name,
            ProviderDefinition::Instance(provider) => provider.name(),
        }
    }
}

impl fmt::Debug for ProviderDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderDefinition::Named(name) => f.debug_tuple("Named").field(name).finish(),
            ProviderDefinition::Instance(p) => f.debug_tuple("Instance").field(&p.name()).finish(),
        }
    }
}

impl From<&str> for ProviderDefinition {
    fn from(name: &str) -> Self {
        ProviderDefinition::Named(name.to_string())
    }
}

impl From<String> for ProviderDefinition {
    fn from(name: String) -> Self {
        ProviderDefinition::Named(name)
    }
}

impl From<Arc<dyn ServiceProvider>> for ProviderDefinition {
    fn from(provider: Arc<dyn ServiceProvider>) -> Self {
        ProviderDefinition::Instance(provider)
    }
}

/// Name → constructor table used to instantiate `Named` definitions.
#[derive(Clone, Default)]
pub struct ProviderCatalog {
    constructors: BTreeMap<String, ProviderConstructor>,
}

impl fmt::Debug for ProviderCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCatalog")
            .field("names", &self.names())
            .finish()
    }
}

impl ProviderCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in provider under its short name.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();
        builtin::register_builtins(&mut catalog);
        catalog
    }

    /// Register a constructor. Replaces any previous entry with the same name.
    pub fn insert<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Result<Arc<dyn ServiceProvider>> + Send + Sync + 'static,
    {
        self.constructors.insert(name.into(), Arc::new(constructor));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    pub fn instantiate(&self, name: &str) -> Result<Arc<dyn ServiceProvider>> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| ProviderError::UnknownProvider { name: name.to_string() })?;

        constructor().map_err(|e| {
            ProviderError::Instantiation {
                name: name.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}
