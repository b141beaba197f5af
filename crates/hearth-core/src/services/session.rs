use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::RngCore;
use serde_json::Value;

use crate::container::Service;
use crate::kernel::error::Result;
use crate::services::error::ServiceError;

/// Attribute key the CSRF token is stored under when no token id is set.
pub const DEFAULT_TOKEN_ID: &str = "_token";

/// A started session: its id and a shared attribute map.
///
/// Clones share the same attributes.
#[derive(Clone)]
pub struct SessionHandle {
    id: String,
    token_id: String,
    attributes: Arc<RwLock<BTreeMap<String, Value>>>,
}

impl SessionHandle {
    fn new(token_id: String) -> Self {
        let handle = Self {
            id: random_hex(20),
            token_id,
            attributes: Arc::new(RwLock::new(BTreeMap::new())),
        };
        handle.regenerate_token();
        handle
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.attributes.read().get(key).cloned()
    }

    pub fn put(&self, key: impl Into<String>, value: Value) {
        self.attributes.write().insert(key.into(), value);
    }

    pub fn forget(&self, key: &str) -> Option<Value> {
        self.attributes.write().remove(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes.read().contains_key(key)
    }

    pub fn all(&self) -> BTreeMap<String, Value> {
        self.attributes.read().clone()
    }

    /// The CSRF token.
    pub fn token(&self) -> Option<String> {
        self.get(&self.token_id).and_then(|v| v.as_str().map(str::to_string))
    }

    pub fn regenerate_token(&self) -> String {
        let token = random_hex(20);
        self.put(self.token_id.clone(), Value::String(token.clone()));
        token
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("attributes_count", &self.attributes.read().len())
            .finish()
    }
}

/// Owns the session of the current request.
#[derive(Debug, Default)]
pub struct SessionManager {
    token_id: RwLock<Option<String>>,
    session: RwLock<Option<SessionHandle>>,
}

impl Service for SessionManager {
    const ID: &'static str = "hearth.session";
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute key used for the CSRF token.
    pub fn set_token_id(&self, token_id: impl Into<String>) {
        *self.token_id.write() = Some(token_id.into());
    }

    pub fn token_id(&self) -> String {
        self.token_id
            .read()
            .clone()
            .unwrap_or_else(|| DEFAULT_TOKEN_ID.to_string())
    }

    /// Start the session. Fails if it was already started.
    pub fn start(&self) -> Result<SessionHandle> {
        let mut session = self.session.write();
        if session.is_some() {
            return Err(ServiceError::SessionAlreadyStarted.into());
        }
        let handle = SessionHandle::new(self.token_id());
        log::debug!("Session {} started", handle.id());
        *session = Some(handle.clone());
        Ok(handle)
    }

    pub fn is_started(&self) -> bool {
        self.session.read().is_some()
    }

    /// Handle on the started session.
    pub fn processor(&self) -> Result<SessionHandle> {
        self.session
            .read()
            .clone()
            .ok_or_else(|| ServiceError::SessionNotStarted.into())
    }
}

fn random_hex(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
