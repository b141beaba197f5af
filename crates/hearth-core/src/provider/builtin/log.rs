use async_trait::async_trait;
use tracing::{debug, info};

use crate::config::Configurator;
use crate::container::{Container, Service};
use crate::kernel::error::Result;
use crate::provider::traits::{ProviderKind, ServiceProvider};
use crate::services::log::LogManager;

#[derive(Debug, Default)]
pub struct LogServiceProvider;

impl LogServiceProvider {
    pub const NAME: &'static str = "log";
}

#[async_trait]
impl ServiceProvider for LogServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![LogManager::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|c| LogManager::from_config(&*c.get::<Configurator>()?));
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Bootable
    }

    async fn boot(&self, container: &Container) -> Result<()> {
        let manager = container.get::<LogManager>()?;
        if manager.install_subscriber() {
            info!(channel = manager.channel(), level = %manager.level(), "Log subscriber installed");
        } else {
            debug!(channel = manager.channel(), "Log subscriber already present");
        }
        Ok(())
    }
}
