//! Named routes and URL generation.
//!
//! Route paths use `{name}` placeholders for required segments and `{name?}`
//! for optional ones.
use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::config::Configurator;
use crate::container::Service;
use crate::kernel::error::Result;
use crate::services::error::ServiceError;

/// Everything but RFC 3986 unreserved characters is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub method: String,
    pub path: String,
}

/// One entry of `routing.routes`: a bare path or a table with a method.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RouteDefinition {
    Path(String),
    Full {
        path: String,
        #[serde(default = "default_method")]
        method: String,
    },
}

fn default_method() -> String {
    "GET".to_string()
}

/// A route matched against a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug)]
pub struct Router {
    base_url: String,
    routes: RwLock<BTreeMap<String, Route>>,
}

impl Service for Router {
    const ID: &'static str = "hearth.router";
}

impl Router {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            routes: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn from_config(config: &Configurator) -> Self {
        Self::new(config.get_str("app_url").unwrap_or_default())
    }

    /// Register the routes listed under `routing.routes`.
    pub fn load_routes(&self, config: &Configurator) -> usize {
        let definitions: BTreeMap<String, RouteDefinition> = config.get_as("routing.routes").unwrap_or_default();
        let count = definitions.len();
        for (name, definition) in definitions {
            match definition {
                RouteDefinition::Path(path) => self.add(&name, "GET", &path),
                RouteDefinition::Full { path, method } => self.add(&name, &method, &path),
            }
        }
        count
    }

    /// Add (or replace) a named route.
    pub fn add(&self, name: &str, method: &str, path: &str) {
        let path = format!("/{}", path.trim_start_matches('/'));
        log::trace!("Route '{}' -> {} {}", name, method, path);
        self.routes.write().insert(
            name.to_string(),
            Route {
                name: name.to_string(),
                method: method.to_ascii_uppercase(),
                path,
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<Route> {
        self.routes.read().get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.routes.read().contains_key(name)
    }

    /// Route names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.routes.read().keys().cloned().collect()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a named route.
    ///
    /// Parameters that fill no placeholder are appended as a query string.
    /// Parameter names and values are percent-encoded. With `absolute` the
    /// application URL is prepended.
    pub fn named_route_url(&self, name: &str, params: &BTreeMap<String, String>, absolute: bool) -> Result<String> {
        let route = self
            .get(name)
            .ok_or_else(|| ServiceError::RouteNotFound(name.to_string()))?;

        let mut used = Vec::new();
        let mut segments = Vec::new();
        for segment in route.path.split('/').filter(|s| !s.is_empty()) {
            match placeholder(segment) {
                Some((key, optional)) => match params.get(key) {
                    Some(value) => {
                        used.push(key);
                        segments.push(encode(value));
                    }
                    None if optional => {}
                    None => {
                        return Err(ServiceError::MissingRouteParameter {
                            route: name.to_string(),
                            parameter: key.to_string(),
                        }
                        .into());
                    }
                },
                None => segments.push(segment.to_string()),
            }
        }

        let mut url = format!("/{}", segments.join("/"));
        let query: Vec<String> = params
            .iter()
            .filter(|(k, _)| !used.contains(&k.as_str()))
            .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }

        Ok(if absolute { self.absolute(&url) } else { url })
    }

    /// Find the route for a method and path.
    pub fn match_path(&self, method: &str, path: &str) -> Option<RouteMatch> {
        let wanted: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        self.routes
            .read()
            .values()
            .filter(|route| route.method.eq_ignore_ascii_case(method))
            .find_map(|route| {
                let params = match_segments(&route.path, &wanted)?;
                Some(RouteMatch {
                    name: route.name.clone(),
                    params,
                })
            })
    }

    fn absolute(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn placeholder(segment: &str) -> Option<(&str, bool)> {
    let inner = segment.strip_prefix('{')?.strip_suffix('}')?;
    match inner.strip_suffix('?') {
        Some(key) => Some((key, true)),
        None => Some((inner, false)),
    }
}

fn encode(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

fn match_segments(pattern: &str, wanted: &[&str]) -> Option<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();
    let mut wanted = wanted.iter();
    for segment in pattern.split('/').filter(|s| !s.is_empty()) {
        match (placeholder(segment), wanted.next()) {
            (Some((key, _)), Some(value)) => {
                params.insert(key.to_string(), percent_decode_str(value).decode_utf8_lossy().into_owned());
            }
            (Some((_, true)), None) => {}
            (None, Some(value)) if *value == segment => {}
            _ => return None,
        }
    }
    if wanted.next().is_some() {
        return None;
    }
    Some(params)
}

/// URL helper bound under the `url` id.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    router: Arc<Router>,
}

impl Service for UrlGenerator {
    const ID: &'static str = "url";
}

impl UrlGenerator {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router }
    }

    /// Absolute URL of an application path.
    pub fn to(&self, path: &str) -> String {
        self.router.absolute(&format!("/{}", path.trim_start_matches('/')))
    }

    pub fn route(&self, name: &str, params: &BTreeMap<String, String>, absolute: bool) -> Result<String> {
        self.router.named_route_url(name, params, absolute)
    }

    pub fn root(&self) -> &str {
        self.router.base_url()
    }
}
