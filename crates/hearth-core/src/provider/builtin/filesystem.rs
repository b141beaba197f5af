use async_trait::async_trait;

use crate::config::Configurator;
use crate::container::{Container, Service};
use crate::kernel::application::AppPaths;
use crate::kernel::error::Result;
use crate::provider::traits::ServiceProvider;
use crate::storage::StorageManager;

#[derive(Debug, Default)]
pub struct FilesystemServiceProvider;

impl FilesystemServiceProvider {
    pub const NAME: &'static str = "filesystem";
}

#[async_trait]
impl ServiceProvider for FilesystemServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![StorageManager::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|c| {
            let paths = c.get::<AppPaths>()?;
            StorageManager::from_config(&paths.base, &*c.get::<Configurator>()?)
        });
        Ok(())
    }
}
