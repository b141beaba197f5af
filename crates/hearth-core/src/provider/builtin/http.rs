use async_trait::async_trait;

use crate::container::{Container, Service};
use crate::env::Env;
use crate::kernel::error::Result;
use crate::provider::traits::{ProviderKind, ServiceProvider};
use crate::services::http::Request;

#[derive(Debug, Default)]
pub struct HttpServiceProvider;

impl HttpServiceProvider {
    pub const NAME: &'static str = "http";
}

#[async_trait]
impl ServiceProvider for HttpServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![Request::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|c| Ok(Request::from_env(&*c.get::<Env>()?)));
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Bootable
    }

    async fn boot(&self, container: &Container) -> Result<()> {
        let request = container.get::<Request>()?;
        log::debug!("Handling {} {}", request.method(), request.uri());
        Ok(())
    }
}
