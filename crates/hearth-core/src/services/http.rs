use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::container::Service;
use crate::env::Env;
use crate::services::session::SessionHandle;

/// The current request, as seen through CGI-style variables.
#[derive(Debug)]
pub struct Request {
    method: String,
    uri: String,
    host: Option<String>,
    session: RwLock<Option<SessionHandle>>,
}

impl Service for Request {
    const ID: &'static str = "hearth.request";
}

impl Request {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
            uri: uri.into(),
            host: None,
            session: RwLock::new(None),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Build from `REQUEST_METHOD`, `REQUEST_URI` and `HTTP_HOST`.
    /// A console process gets `GET /` without a host.
    pub fn from_env(env: &Env) -> Self {
        let request = Self::new(env.get_or("REQUEST_METHOD", "GET"), env.get_or("REQUEST_URI", "/"));
        match env.get("HTTP_HOST").filter(|h| !h.is_empty()) {
            Some(host) => request.with_host(host),
            None => request,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The URI without its query string.
    pub fn path(&self) -> &str {
        self.uri.split_once('?').map_or(self.uri.as_str(), |(path, _)| path)
    }

    pub fn query(&self) -> Option<&str> {
        self.uri.split_once('?').map(|(_, query)| query)
    }

    /// Query parameters as given; later duplicates win. Values are not percent-decoded.
    pub fn query_params(&self) -> BTreeMap<String, String> {
        self.query()
            .into_iter()
            .flat_map(|q| q.split('&'))
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (k.to_string(), v.to_string()),
                None => (pair.to_string(), String::new()),
            })
            .collect()
    }

    pub fn set_session(&self, session: SessionHandle) {
        *self.session.write() = Some(session);
    }

    pub fn session(&self) -> Option<SessionHandle> {
        self.session.read().clone()
    }

    pub fn has_session(&self) -> bool {
        self.session.read().is_some()
    }
}
