use async_trait::async_trait;

use crate::container::{Container, Service};
use crate::kernel::error::Result;
use crate::provider::traits::ServiceProvider;
use crate::services::validation::Validator;

#[derive(Debug, Default)]
pub struct ValidationServiceProvider;

impl ValidationServiceProvider {
    pub const NAME: &'static str = "validation";
}

#[async_trait]
impl ServiceProvider for ValidationServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![Validator::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|_| Ok(Validator::new()));
        Ok(())
    }
}
