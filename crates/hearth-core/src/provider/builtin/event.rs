use async_trait::async_trait;

use crate::container::{Container, Service};
use crate::event::EventDispatcher;
use crate::kernel::error::Result;
use crate::provider::traits::{ProviderKind, ServiceProvider};

#[derive(Debug, Default)]
pub struct EventServiceProvider;

impl EventServiceProvider {
    pub const NAME: &'static str = "event";
}

#[async_trait]
impl ServiceProvider for EventServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![EventDispatcher::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|_| Ok(EventDispatcher::new()));
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Bootable
    }

    // Build the dispatcher now so later providers can listen during their own boot.
    async fn boot(&self, container: &Container) -> Result<()> {
        container.get::<EventDispatcher>()?;
        Ok(())
    }
}
