//! # Hearth Helpers
//!
//! Short accessors over the service container. [`Helpers`] is implemented for
//! [`Application`] and resolves every service through its alias, so a `proxy`
//! entry that re-points an alias is honoured here too.
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::Configurator;
use crate::env::Env;
use crate::event::EventDispatcher;
use crate::kernel::application::Application;
use crate::kernel::error::Result;
use crate::services::{
    AssetManager, DatabaseManager, Encrypter, LogManager, Request, SessionHandle, SessionManager,
    TableRef, UrlGenerator, Validator,
};
use crate::storage::{StorageManager, StorageProvider};

pub trait Helpers {
    /// Resolve `id` (or the alias `id`) as `T`.
    fn service<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>>;

    fn asset(&self) -> Result<Arc<AssetManager>> {
        self.service("asset")
    }

    fn config(&self) -> Result<Arc<Configurator>> {
        self.service("config")
    }

    /// A configuration value, or `default` when the key is missing or null.
    fn config_value(&self, key: &str, default: Value) -> Result<Value> {
        Ok(self
            .config()?
            .get(key)
            .filter(|v| !v.is_null())
            .unwrap_or(default))
    }

    /// Write several dotted keys at once.
    fn set_config(&self, values: Map<String, Value>) -> Result<()> {
        self.config()?.set_many(values)
    }

    fn database(&self) -> Result<Arc<DatabaseManager>> {
        self.service("database")
    }

    fn table(&self, name: &str) -> Result<TableRef> {
        Ok(self.database()?.table(name))
    }

    fn env(&self, key: &str, default: &str) -> Result<String> {
        Ok(self.service::<Env>("env")?.get_or(key, default))
    }

    fn event(&self) -> Result<Arc<EventDispatcher>> {
        self.service("event")
    }

    fn encrypter(&self) -> Result<Arc<Encrypter>> {
        self.service("crypt")
    }

    fn logger(&self) -> Result<Arc<LogManager>> {
        self.service("log")
    }

    fn log_debug(&self, message: &str, context: &Value) -> Result<()> {
        self.logger()?.debug(message, context);
        Ok(())
    }

    fn request(&self) -> Result<Arc<Request>> {
        self.service("request")
    }

    /// URL of a named route.
    fn route(&self, name: &str, params: &BTreeMap<String, String>, absolute: bool) -> Result<String> {
        self.service::<UrlGenerator>("url")?.route(name, params, absolute)
    }

    fn storage(&self) -> Result<Arc<StorageManager>> {
        self.service("storage")
    }

    fn disk(&self, name: &str) -> Result<Arc<dyn StorageProvider>> {
        self.storage()?.disk(name)
    }

    /// The started session.
    fn session(&self) -> Result<SessionHandle> {
        self.service::<SessionManager>("session")?.processor()
    }

    fn validator(&self) -> Result<Arc<Validator>> {
        self.service("validator")
    }
}

impl Helpers for Application {
    fn service<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        self.container().get_as::<T>(id)
    }
}
