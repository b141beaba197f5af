//! Providers for the framework's own subsystems.
//!
//! Each provider binds one service (routing also binds `url`) as a lazy
//! singleton and is registered in the catalog under its short name.
mod asset;
mod database;
mod encryption;
mod event;
mod filesystem;
mod http;
mod log;
mod routing;
mod session;
mod validation;

use std::sync::Arc;

use crate::kernel::error::Result;
use crate::provider::definition::ProviderCatalog;
use crate::provider::traits::ServiceProvider;

pub use asset::AssetServiceProvider;
pub use database::DatabaseServiceProvider;
pub use encryption::EncryptionServiceProvider;
pub use event::EventServiceProvider;
pub use filesystem::FilesystemServiceProvider;
pub use http::HttpServiceProvider;
pub use self::log::LogServiceProvider;
pub use routing::RoutingServiceProvider;
pub use session::SessionServiceProvider;
pub use validation::ValidationServiceProvider;

/// Names of the built-in providers, in default boot order.
pub const BUILTIN_PROVIDERS: [&str; 10] = [
    "asset",
    "database",
    "encryption",
    "event",
    "filesystem",
    "http",
    "log",
    "routing",
    "session",
    "validation",
];

fn shared<P: ServiceProvider + Default + 'static>() -> Result<Arc<dyn ServiceProvider>> {
    Ok(Arc::new(P::default()))
}

/// Add every built-in provider to `catalog`.
pub fn register_builtins(catalog: &mut ProviderCatalog) {
    catalog.insert(AssetServiceProvider::NAME, shared::<AssetServiceProvider>);
    catalog.insert(DatabaseServiceProvider::NAME, shared::<DatabaseServiceProvider>);
    catalog.insert(EncryptionServiceProvider::NAME, shared::<EncryptionServiceProvider>);
    catalog.insert(EventServiceProvider::NAME, shared::<EventServiceProvider>);
    catalog.insert(FilesystemServiceProvider::NAME, shared::<FilesystemServiceProvider>);
    catalog.insert(HttpServiceProvider::NAME, shared::<HttpServiceProvider>);
    catalog.insert(LogServiceProvider::NAME, shared::<LogServiceProvider>);
    catalog.insert(RoutingServiceProvider::NAME, shared::<RoutingServiceProvider>);
    catalog.insert(SessionServiceProvider::NAME, shared::<SessionServiceProvider>);
    catalog.insert(ValidationServiceProvider::NAME, shared::<ValidationServiceProvider>);
}
