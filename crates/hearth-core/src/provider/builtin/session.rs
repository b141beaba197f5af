use async_trait::async_trait;

use crate::container::{Container, Service};
use crate::env::Env;
use crate::kernel::error::Result;
use crate::provider::traits::ServiceProvider;
use crate::services::session::SessionManager;

#[derive(Debug, Default)]
pub struct SessionServiceProvider;

impl SessionServiceProvider {
    pub const NAME: &'static str = "session";
}

#[async_trait]
impl ServiceProvider for SessionServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![SessionManager::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|c| {
            let sessions = SessionManager::new();
            if let Some(token_id) = c.get::<Env>()?.get("APP_KEY").filter(|k| !k.is_empty()) {
                sessions.set_token_id(token_id);
            }
            Ok(sessions)
        });
        Ok(())
    }
}
