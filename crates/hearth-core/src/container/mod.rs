//! # Hearth Service Container
//!
//! A typed, explicit service registry. Services are bound under canonical
//! string ids either as pre-built instances, lazy singletons (`share`) or
//! transient factories (`add`), and are resolved by id or, for types that
//! implement [`Service`], by type.
//!
//! Short names are routed to canonical ids through an [`AliasTable`] that is
//! frozen once the kernel has booted. Service providers added to the
//! container are registered lazily, the first time one of the ids they
//! declare is requested.
pub mod alias;
pub mod error;
pub mod registry;

pub use alias::AliasTable;
pub use error::ContainerError;
pub use registry::{Container, Factory, Service, ServiceInstance};

#[cfg(test)]
mod tests;
