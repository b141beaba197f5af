use std::any::{type_name, Any};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::container::alias::AliasTable;
use crate::container::error::ContainerError;
use crate::kernel::error::Result;
use crate::provider::traits::ServiceProvider;

/// Type-erased value stored in the container.
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

/// Type-erased factory. Receives the container so it can resolve its own dependencies.
pub type Factory = Arc<dyn Fn(&Container) -> Result<ServiceInstance> + Send + Sync>;

/// A service with a compile-time canonical identifier.
///
/// `Container::get::<T>()` resolves `T::ID` and downcasts the stored value to `T`.
pub trait Service: Any + Send + Sync {
    const ID: &'static str;
}

enum Binding {
    /// Pre-built value.
    Instance(ServiceInstance),
    /// Lazy singleton: built on first resolution, then reused.
    Shared {
        factory: Factory,
        instance: OnceLock<ServiceInstance>,
    },
    /// Built again on every resolution.
    Transient(Factory),
}

impl Binding {
    fn kind(&self) -> &'static str {
        match self {
            Binding::Instance(_) => "instance",
            Binding::Shared { .. } => "shared",
            Binding::Transient(_) => "transient",
        }
    }
}

/// A provider added to the container, registered on first demand.
struct ProviderSlot {
    provider: Arc<dyn ServiceProvider>,
    registered: AtomicBool,
}

/// Process-wide service registry.
///
/// Maps canonical ids to instances or factories, routes aliases to canonical
/// ids, and defers provider registration until one of the ids a provider
/// `provides()` is first requested.
#[derive(Default)]
pub struct Container {
    bindings: RwLock<HashMap<String, Arc<Binding>>>,
    aliases: RwLock<AliasTable>,
    providers: RwLock<Vec<Arc<ProviderSlot>>>,
    deferred: RwLock<HashMap<String, Arc<ProviderSlot>>>,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings_count", &self.bindings.read().len())
            .field("aliases_count", &self.aliases.read().len())
            .field("providers_count", &self.providers.read().len())
            .finish()
    }
}

impl Container {
    /// Create a new empty container
    pub fn new() -> Self {
        Self::default()
    }

    fn bind(&self, id: String, binding: Binding) {
        log::trace!("Binding {} service '{}'", binding.kind(), id);
        self.bindings.write().insert(id, Arc::new(binding));
    }

    /// Bind a pre-built value under `id`.
    pub fn instance<T: Any + Send + Sync>(&self, id: impl Into<String>, value: T) {
        self.instance_arc(id, Arc::new(value));
    }

    /// Bind an already shared value under `id`.
    pub fn instance_arc<T: Any + Send + Sync>(&self, id: impl Into<String>, value: Arc<T>) {
        self.bind(id.into(), Binding::Instance(value));
    }

    /// Bind a lazy singleton factory under `id`.
    pub fn share<T, F>(&self, id: impl Into<String>, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
    {
        self.bind(
            id.into(),
            Binding::Shared {
                factory: erase(factory),
                instance: OnceLock::new(),
            },
        );
    }

    /// Bind a transient factory under `id`; every resolution builds a new value.
    pub fn add<T, F>(&self, id: impl Into<String>, factory: F)
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
    {
        self.bind(id.into(), Binding::Transient(erase(factory)));
    }

    /// Bind a lazy singleton under the service's canonical id.
    pub fn share_service<T, F>(&self, factory: F)
    where
        T: Service,
        F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
    {
        self.share(T::ID, factory);
    }

    /// Bind an already shared service under its canonical id.
    pub fn instance_service<T: Service>(&self, value: Arc<T>) {
        self.instance_arc(T::ID, value);
    }

    /// Route `alias` to the canonical id `target`.
    pub fn alias(&self, alias: impl Into<String>, target: impl Into<String>) -> Result<()> {
        self.aliases.write().insert(alias, target)
    }

    /// Make the alias table read-only.
    pub fn freeze_aliases(&self) {
        self.aliases.write().freeze();
    }

    /// Snapshot of the alias table.
    pub fn aliases(&self) -> AliasTable {
        self.aliases.read().clone()
    }

    /// Canonical id for `id`, following one alias hop.
    pub fn canonical(&self, id: &str) -> String {
        self.aliases.read().resolve(id).to_string()
    }

    /// Whether `id` (or the id it aliases) is bound or provided by a pending provider.
    pub fn has(&self, id: &str) -> bool {
        let id = self.canonical(id);
        self.bindings.read().contains_key(&id) || self.deferred.read().contains_key(&id)
    }

    /// Canonical ids known to the container, bound or deferred, sorted.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: BTreeSet<String> = self.bindings.read().keys().cloned().collect();
        ids.extend(self.deferred.read().keys().cloned());
        ids.into_iter().collect()
    }

    /// Resolve `id` to its type-erased value.
    pub fn get_any(&self, id: &str) -> Result<ServiceInstance> {
        let id = self.canonical(id);
        let binding = self.binding(&id)?;

        match &*binding {
            Binding::Instance(value) => Ok(value.clone()),
            Binding::Shared { factory, instance } => {
                if let Some(value) = instance.get() {
                    return Ok(value.clone());
                }
                // Factory runs without any container lock held so it can resolve its dependencies.
                let built = factory(self).map_err(|e| ContainerError::ResolutionFailed {
                    id: id.clone(),
                    source: Box::new(e),
                })?;
                Ok(instance.get_or_init(|| built).clone())
            }
            Binding::Transient(factory) => factory(self).map_err(|e| {
                ContainerError::ResolutionFailed {
                    id: id.clone(),
                    source: Box::new(e),
                }
                .into()
            }),
        }
    }

    /// Resolve `id` and downcast it to `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        let value = self.get_any(id)?;
        Arc::downcast::<T>(value).map_err(|_| {
            ContainerError::TypeMismatch {
                id: self.canonical(id),
                expected: type_name::<T>(),
            }
            .into()
        })
    }

    /// Resolve a service by its canonical id.
    pub fn get<T: Service>(&self) -> Result<Arc<T>> {
        self.get_as::<T>(T::ID)
    }

    fn binding(&self, id: &str) -> Result<Arc<Binding>> {
        if let Some(binding) = self.bindings.read().get(id).cloned() {
            return Ok(binding);
        }

        let slot = self.deferred.read().get(id).cloned();
        if let Some(slot) = slot {
            self.register_slot(&slot)?;
            if let Some(binding) = self.bindings.read().get(id).cloned() {
                return Ok(binding);
            }
            log::warn!(
                "Provider '{}' declares '{}' but did not bind it",
                slot.provider.name(),
                id
            );
        }

        Err(ContainerError::NotFound { id: id.to_string() }.into())
    }

    fn register_slot(&self, slot: &ProviderSlot) -> Result<()> {
        if slot.registered.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        log::debug!("Registering service provider '{}'", slot.provider.name());
        if let Err(e) = slot.provider.register(self) {
            slot.registered.store(false, Ordering::SeqCst);
            return Err(e);
        }
        Ok(())
    }

    /// Add a provider. Its `register()` runs on first resolution of one of its
    /// `provides()` ids, or immediately when it provides nothing.
    pub fn add_service_provider(&self, provider: Arc<dyn ServiceProvider>) -> Result<()> {
        let name = provider.name().to_string();
        if self.providers.read().iter().any(|s| s.provider.name() == name) {
            return Err(ContainerError::DuplicateProvider { name }.into());
        }

        let slot = Arc::new(ProviderSlot {
            provider,
            registered: AtomicBool::new(false),
        });
        let provides = slot.provider.provides();
        self.providers.write().push(slot.clone());

        if provides.is_empty() {
            return self.register_slot(&slot);
        }

        let mut deferred = self.deferred.write();
        for id in provides {
            deferred.insert(id.to_string(), slot.clone());
        }
        Ok(())
    }

    /// Providers in the order they were added.
    pub fn providers(&self) -> Vec<Arc<dyn ServiceProvider>> {
        self.providers
            .read()
            .iter()
            .map(|slot| slot.provider.clone())
            .collect()
    }

    /// Whether the named provider has run its `register()`.
    pub fn is_provider_registered(&self, name: &str) -> bool {
        self.providers
            .read()
            .iter()
            .any(|slot| slot.provider.name() == name && slot.registered.load(Ordering::SeqCst))
    }

    /// Run `register()` on every provider that has not registered yet.
    pub fn register_all(&self) -> Result<()> {
        let slots: Vec<Arc<ProviderSlot>> = self.providers.read().clone();
        for slot in slots {
            self.register_slot(&slot)?;
        }
        Ok(())
    }
}

fn erase<T, F>(factory: F) -> Factory
where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
{
    Arc::new(move |container: &Container| {
        factory(container).map(|value| Arc::new(value) as ServiceInstance)
    })
}
