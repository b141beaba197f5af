//! # Hearth Core
//!
//! Kernel, service container and service providers of the Hearth application
//! framework. A [`Kernel`] loads the environment and configuration of an
//! application directory, adds the configured [`ServiceProvider`]s to a
//! [`Container`] and boots them in order.
pub mod config;
pub mod container;
pub mod env;
pub mod event;
pub mod helpers;
pub mod kernel;
pub mod provider;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export key public types for the binary and for applications
pub use config::Configurator;
pub use container::{Container, Service};
pub use env::Env;
pub use event::{Event, EventDispatcher};
pub use helpers::Helpers;
pub use kernel::error::Error as KernelError;
pub use kernel::{Application, Kernel, KernelBuilder, Result};
pub use provider::{ProviderCatalog, ProviderDefinition, ProviderKind, ServiceProvider};
pub use storage::StorageProvider;

#[cfg(test)]
mod tests;
