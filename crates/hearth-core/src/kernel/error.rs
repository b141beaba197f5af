//! # Hearth Kernel Errors
//!
//! Defines the top-level error type of the Hearth kernel.
//!
//! [`Error`] aggregates the typed errors of every subsystem (container,
//! providers, configuration, environment, storage, services) through `#[from]`
//! conversions, and adds [`Error::KernelLifecycleError`] for failures that
//! happen during a specific boot phase.
use std::path::PathBuf;
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::container::error::ContainerError;
use crate::env::error::EnvError;
use crate::provider::error::ProviderError;
use crate::services::error::ServiceError;
use crate::storage::error::StorageSystemError;

/// Custom error type for the Hearth kernel
#[derive(Debug, ThisError)]
pub enum Error {
    /// Service container error
    #[error("Container error: {0}")]
    Container(#[from] ContainerError),

    /// Service provider error
    #[error("Service provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration store error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Environment loading error
    #[error("Environment error: {0}")]
    Env(#[from] EnvError),

    /// Storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Built-in service error
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Error occurring during a specific kernel boot phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },

    /// A process-wide instance was requested before it existed.
    #[error("Unavailable [{what}] instance")]
    InstanceUnavailable { what: &'static str },

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Represents a specific phase of the kernel boot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    #[error("Env")]
    Env,
    #[error("Config")]
    Config,
    #[error("Container")]
    Container,
    #[error("Proxies")]
    Proxies,
    #[error("Services")]
    Services,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

impl Error {
    /// Wrap an I/O error with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// Wrap `self` as the cause of a failed boot phase.
    pub fn in_phase(self, phase: KernelLifecyclePhase, message: impl Into<String>) -> Self {
        Error::KernelLifecycleError {
            phase,
            message: message.into(),
            source: Some(Box::new(self)),
        }
    }

    /// The boot phase this error was raised in, if any.
    pub fn phase(&self) -> Option<KernelLifecyclePhase> {
        match self {
            Error::KernelLifecycleError { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
