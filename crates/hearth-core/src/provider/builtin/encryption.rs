use async_trait::async_trait;

use crate::container::{Container, Service};
use crate::env::Env;
use crate::kernel::error::Result;
use crate::provider::traits::ServiceProvider;
use crate::services::encryption::{Cipher, Encrypter, DEFAULT_CIPHER};

#[derive(Debug, Default)]
pub struct EncryptionServiceProvider;

impl EncryptionServiceProvider {
    pub const NAME: &'static str = "encryption";
}

#[async_trait]
impl ServiceProvider for EncryptionServiceProvider {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn provides(&self) -> Vec<&'static str> {
        vec![Encrypter::ID]
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.share_service(|c| {
            let env = c.get::<Env>()?;
            let cipher: Cipher = env.get_or("APP_CIPHER", DEFAULT_CIPHER.as_str()).parse()?;
            Encrypter::from_hex_key(env.get("APP_KEY").as_deref(), cipher)
        });
        Ok(())
    }
}
