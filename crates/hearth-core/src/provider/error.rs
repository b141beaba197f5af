//! # Hearth Service Provider Errors
//!
//! Defines [`ProviderError`]: failures to turn a provider definition into a
//! provider instance, and failures of a provider's boot step.
use thiserror::Error;

use crate::kernel::error::Error as KernelError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("ServiceProvider [{name}] instantiation returned an error: {message}")]
    Instantiation { name: String, message: String },

    #[error("ServiceProvider [{name}] is not known to the provider catalog")]
    UnknownProvider { name: String },

    #[error("ServiceProvider definition [{definition}] type not supported")]
    UnsupportedDefinition { definition: String },

    #[error("ServiceProvider [{name}] failed to boot: {source}")]
    BootFailed {
        name: String,
        #[source]
        source: Box<KernelError>,
    },
}
