use async_trait::async_trait;

use crate::config::Configurator;
use crate::container::{Container, Service};
use crate::kernel::error::Result;
use crate::provider::traits::ServiceProvider;
use crate::services::database::DatabaseManager;

#[derive(Debug, Default)]
pub struct DatabaseServiceProvider;

impl DatabaseServiceProvider {
    pub const NAME: &'static str = "database";
}

#[async_trait]
impl ServiceProvider for DatabaseServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![DatabaseManager::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|c| Ok(DatabaseManager::from_config(&*c.get::<Configurator>()?)));
        Ok(())
    }
}
