use std::collections::BTreeMap;

use crate::container::error::ContainerError;
use crate::kernel::error::Result;

/// Many-to-one table routing short names to canonical service ids.
///
/// Populated during boot, then frozen. Lookups follow a single hop: an alias
/// always names a canonical id, never another alias.
#[derive(Debug, Default, Clone)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
    frozen: bool,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route `alias` to `target`. Re-pointing an existing alias overwrites it.
    ///
    /// A `target` that is itself an alias is stored as its canonical id, and
    /// aliases that pointed at `alias` follow it to the new target.
    pub fn insert(&mut self, alias: impl Into<String>, target: impl Into<String>) -> Result<()> {
        let alias = alias.into();
        let target = target.into();
        if self.frozen {
            return Err(ContainerError::AliasTableFrozen { alias, target }.into());
        }
        let target = self.resolve(&target).to_string();
        if alias == target {
            return Err(ContainerError::SelfAlias { alias }.into());
        }
        for existing in self.entries.values_mut() {
            if *existing == alias {
                existing.clone_from(&target);
            }
        }
        self.entries.insert(alias, target);
        Ok(())
    }

    /// Resolve `id` to its canonical form. Unknown ids are returned as is.
    pub fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.entries.get(id).map(String::as_str).unwrap_or(id)
    }

    pub fn is_alias(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// All aliases pointing at `target`, sorted.
    pub fn aliases_for(&self, target: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, t)| t.as_str() == target)
            .map(|(a, _)| a.clone())
            .collect()
    }

    /// Iterate `(alias, target)` pairs in alias order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Make the table read-only. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}
