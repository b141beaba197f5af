use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Configurator;
use crate::container::{Container, Service};
use crate::kernel::error::Result;
use crate::provider::traits::{ProviderKind, ServiceProvider};
use crate::services::routing::{Router, UrlGenerator};

#[derive(Debug, Default)]
pub struct RoutingServiceProvider;

impl RoutingServiceProvider {
    pub const NAME: &'static str = "routing";
}

#[async_trait]
impl ServiceProvider for RoutingServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![Router::ID, UrlGenerator::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|c| Ok(Router::from_config(&*c.get::<Configurator>()?)));
        container.share_service(|c| Ok(UrlGenerator::new(c.get::<Router>()?)));
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Bootable
    }

    async fn boot(&self, container: &Container) -> Result<()> {
        let router: Arc<Router> = container.get()?;
        let loaded = router.load_routes(&*container.get::<Configurator>()?);
        log::debug!("Loaded {} route(s)", loaded);
        Ok(())
    }
}
