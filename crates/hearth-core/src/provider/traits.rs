use std::fmt;

use async_trait::async_trait;

use crate::container::Container;
use crate::kernel::error::Result;

/// Whether a provider needs a post-registration boot step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    /// Only installs factories.
    #[default]
    Standard,
    /// Installs factories, then `boot()` runs once after every provider is added.
    Bootable,
}

impl ProviderKind {
    pub fn is_bootable(&self) -> bool {
        matches!(self, ProviderKind::Bootable)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Standard => write!(f, "standard"),
            ProviderKind::Bootable => write!(f, "bootable"),
        }
    }
}

/// A unit that registers the factories of one subsystem into the container.
#[async_trait]
pub trait ServiceProvider: Send + Sync {
    /// The name of the provider, unique within a container
    fn name(&self) -> &'static str;

    /// Canonical ids this provider binds. Resolving any of them triggers `register()`.
    fn provides(&self) -> Vec<&'static str>;

    /// Install factories into the container.
    fn register(&self, container: &Container) -> Result<()>;

    /// Declared upfront instead of probed at runtime.
    fn kind(&self) -> ProviderKind {
        ProviderKind::Standard
    }

    /// Post-registration step for bootable providers. Runs once, in provider-list order.
    async fn boot(&self, _container: &Container) -> Result<()> {
        Ok(())
    }
}

impl fmt::Debug for dyn ServiceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("name", &self.name())
            .field("kind", &self.kind())
            .field("provides", &self.provides())
            .finish()
    }
}
