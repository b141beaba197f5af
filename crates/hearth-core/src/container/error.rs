//! # Hearth Container Errors
//!
//! Defines [`ContainerError`], raised when a service cannot be resolved, a
//! resolved value has an unexpected type, a factory fails, or the alias
//! table is modified after it has been frozen.
use thiserror::Error;

use crate::kernel::error::Error as KernelError;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Service '{id}' is not registered in the container")]
    NotFound { id: String },

    #[error("Service '{id}' does not hold a value of type '{expected}'")]
    TypeMismatch { id: String, expected: &'static str },

    #[error("Failed to resolve service '{id}': {source}")]
    ResolutionFailed {
        id: String,
        #[source]
        source: Box<KernelError>,
    },

    #[error("Alias table is frozen, cannot add alias '{alias}' -> '{target}'")]
    AliasTableFrozen { alias: String, target: String },

    #[error("Alias '{alias}' cannot point to itself, directly or through another alias")]
    SelfAlias { alias: String },

    #[error("Service provider '{name}' is already registered")]
    DuplicateProvider { name: String },
}
