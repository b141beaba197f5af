//! # Hearth Service Providers
//!
//! A service provider registers the factories of one subsystem into the
//! [`Container`](crate::container::Container). Providers declare upfront the
//! ids they bind ([`ServiceProvider::provides`]) and whether they need a boot
//! step ([`ProviderKind`]).
//!
//! Providers enter the boot list as [`ProviderDefinition`]s: either a name
//! looked up in a [`ProviderCatalog`], or a ready instance. The `builtin`
//! submodule holds one provider per framework subsystem.
pub mod builtin;
pub mod definition;
pub mod error;
pub mod traits;

pub use definition::{ProviderCatalog, ProviderConstructor, ProviderDefinition};
pub use error::ProviderError;
pub use traits::{ProviderKind, ServiceProvider};
