use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::container::error::ContainerError;
use crate::container::registry::Container;
use crate::kernel::error::{Error, Result};
use crate::provider::traits::ServiceProvider;

/// Binds `mailer` and `mailer.transport` when registered.
#[derive(Debug, Default)]
struct MailProvider {
    registrations: AtomicU32,
}

#[async_trait]
impl ServiceProvider for MailProvider {
    fn name(&self) -> &'static str {
        "mail"
    }

    fn provides(&self) -> Vec<&'static str> {
        vec!["mailer", "mailer.transport"]
    }

    fn register(&self, container: &Container) -> Result<()> {
        self.registrations.fetch_add(1, Ordering::SeqCst);
        container.instance("mailer", "smtp-mailer".to_string());
        container.instance("mailer.transport", "smtp".to_string());
        Ok(())
    }
}

/// Provides nothing, so it registers as soon as it is added.
#[derive(Debug, Default)]
struct EagerProvider;

#[async_trait]
impl ServiceProvider for EagerProvider {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn provides(&self) -> Vec<&'static str> {
        Vec::new()
    }

    fn register(&self, container: &Container) -> Result<()> {
        container.instance("eager.flag", true);
        Ok(())
    }
}

/// Declares an id it never binds.
#[derive(Debug, Default)]
struct LyingProvider;

#[async_trait]
impl ServiceProvider for LyingProvider {
    fn name(&self) -> &'static str {
        "lying"
    }

    fn provides(&self) -> Vec<&'static str> {
        vec!["promised"]
    }

    fn register(&self, _container: &Container) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_register_runs_on_first_resolution() {
    let container = Container::new();
    let provider = Arc::new(MailProvider::default());
    container.add_service_provider(provider.clone()).unwrap();

    assert!(container.has("mailer"));
    assert!(!container.is_provider_registered("mail"));
    assert_eq!(provider.registrations.load(Ordering::SeqCst), 0);

    assert_eq!(*container.get_as::<String>("mailer").unwrap(), "smtp-mailer");
    assert_eq!(*container.get_as::<String>("mailer.transport").unwrap(), "smtp");
    assert!(container.is_provider_registered("mail"));
    assert_eq!(provider.registrations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_provider_without_ids_registers_immediately() {
    let container = Container::new();
    container.add_service_provider(Arc::new(EagerProvider)).unwrap();

    assert!(container.is_provider_registered("eager"));
    assert!(*container.get_as::<bool>("eager.flag").unwrap());
}

#[test]
fn test_duplicate_provider_rejected() {
    let container = Container::new();
    container.add_service_provider(Arc::new(EagerProvider)).unwrap();
    assert!(matches!(
        container.add_service_provider(Arc::new(EagerProvider)),
        Err(Error::Container(ContainerError::DuplicateProvider { .. }))
    ));
    assert_eq!(container.providers().len(), 1);
}

#[test]
fn test_register_all() {
    let container = Container::new();
    let provider = Arc::new(MailProvider::default());
    container.add_service_provider(provider.clone()).unwrap();
    container.register_all().unwrap();
    container.register_all().unwrap();

    assert!(container.is_provider_registered("mail"));
    assert_eq!(provider.registrations.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unbound_promise_is_not_found() {
    let container = Container::new();
    container.add_service_provider(Arc::new(LyingProvider)).unwrap();

    assert!(container.has("promised"));
    assert!(matches!(
        container.get_any("promised"),
        Err(Error::Container(ContainerError::NotFound { .. }))
    ));
}

#[test]
fn test_alias_reaches_deferred_service() {
    let container = Container::new();
    container.add_service_provider(Arc::new(MailProvider::default())).unwrap();
    container.alias("mail", "mailer").unwrap();

    assert_eq!(*container.get_as::<String>("mail").unwrap(), "smtp-mailer");
}
