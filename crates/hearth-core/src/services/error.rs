//! # Hearth Service Errors
//!
//! Defines [`ServiceError`], raised by the built-in services registered by the
//! default providers (encryption, routing, sessions, validation, ...).
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unsupported cipher '{0}'")]
    UnsupportedCipher(String),

    #[error("Invalid key for cipher '{cipher}': expected {expected} bytes, got {actual}")]
    InvalidKey {
        cipher: String,
        expected: usize,
        actual: usize,
    },

    #[error("Encryption key is not valid hex: {0}")]
    InvalidKeyEncoding(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("The payload could not be decrypted")]
    DecryptionFailed,

    #[error("Invalid encrypted payload: {0}")]
    InvalidPayload(String),

    #[error("Asset '{0}' is not registered")]
    UnknownAsset(String),

    #[error("Database connection '{0}' is not configured")]
    UnknownConnection(String),

    #[error("Route '{0}' is not defined")]
    RouteNotFound(String),

    #[error("Route '{route}' requires parameter '{parameter}'")]
    MissingRouteParameter { route: String, parameter: String },

    #[error("Session has already been started")]
    SessionAlreadyStarted,

    #[error("Session has not been started")]
    SessionNotStarted,

    #[error("Unknown validation rule '{0}'")]
    UnknownRule(String),

    #[error("Invalid validation rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },

    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),
}
