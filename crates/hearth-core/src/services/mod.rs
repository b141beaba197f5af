//! # Hearth Built-in Services
//!
//! The subsystems registered by the default service providers. Each type
//! implements [`Service`](crate::container::Service) with the canonical id it
//! is bound under; the default alias table maps the short names (`asset`,
//! `db`, `crypt`, ...) onto those ids.
pub mod asset;
pub mod database;
pub mod encryption;
pub mod error;
pub mod http;
pub mod log;
pub mod routing;
pub mod session;
pub mod validation;

pub use asset::AssetManager;
pub use database::{ConnectionConfig, DatabaseManager, TableRef};
pub use encryption::{Cipher, Encrypter};
pub use error::ServiceError;
pub use http::Request;
pub use self::log::LogManager;
pub use routing::{Route, RouteMatch, Router, UrlGenerator};
pub use session::{SessionHandle, SessionManager};
pub use validation::{Validation, Validator};

pub use crate::event::EventDispatcher;
pub use crate::storage::StorageManager;

#[cfg(test)]
mod tests;
