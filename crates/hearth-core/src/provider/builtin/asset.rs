use async_trait::async_trait;

use crate::config::Configurator;
use crate::container::{Container, Service};
use crate::kernel::error::Result;
use crate::provider::traits::{ProviderKind, ServiceProvider};
use crate::services::asset::AssetManager;

#[derive(Debug, Default)]
pub struct AssetServiceProvider;

impl AssetServiceProvider {
    pub const NAME: &'static str = "asset";
}

#[async_trait]
impl ServiceProvider for AssetServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![AssetManager::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|c| Ok(AssetManager::from_config(&*c.get::<Configurator>()?)));
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Bootable
    }

    async fn boot(&self, container: &Container) -> Result<()> {
        let config = container.get::<Configurator>()?;
        let loaded = container.get::<AssetManager>()?.load_entries(&config);
        log::debug!("Registered {} named asset(s)", loaded);
        Ok(())
    }
}
