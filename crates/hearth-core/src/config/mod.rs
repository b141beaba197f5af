//! # Hearth Configuration
//!
//! The [`Configurator`] is the application's configuration store: a tree of
//! `serde_json::Value`s addressed by dotted keys, with optional per-key
//! [`Expect`] schema checks. Sections can be loaded from a directory of
//! JSON, YAML or TOML files (see [`ConfigFormat`]).
pub mod error;
pub mod format;
pub mod schema;
pub mod store;

pub use error::ConfigError;
pub use format::ConfigFormat;
pub use schema::Expect;
pub use store::Configurator;
