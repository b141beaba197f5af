use std::str::FromStr;

use log::{Level, LevelFilter};
use serde::Deserialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::config::Configurator;
use crate::container::Service;
use crate::kernel::error::Result;
use crate::services::error::ServiceError;

pub const DEFAULT_CHANNEL: &str = "hearth";

#[derive(Debug, Default, Deserialize)]
struct LogSection {
    channel: Option<String>,
    level: Option<String>,
}

/// Application logger: a named channel with a minimum level, writing through
/// the `log` facade.
#[derive(Debug, Clone)]
pub struct LogManager {
    channel: String,
    level: LevelFilter,
}

impl Service for LogManager {
    const ID: &'static str = "hearth.log";
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL, LevelFilter::Info)
    }
}

impl LogManager {
    pub fn new(channel: impl Into<String>, level: LevelFilter) -> Self {
        Self {
            channel: channel.into(),
            level,
        }
    }

    /// Build from `log.channel` and `log.level`.
    pub fn from_config(config: &Configurator) -> Result<Self> {
        let section: LogSection = config.get_as("log").unwrap_or_default();
        let level = match section.level.filter(|l| !l.is_empty()) {
            Some(level) => LevelFilter::from_str(&level).map_err(|_| ServiceError::InvalidLogLevel(level))?,
            None => LevelFilter::Info,
        };
        let channel = section
            .channel
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CHANNEL.to_string());
        Ok(Self::new(channel, level))
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Log `message` on the channel. A non-empty `context` is appended as JSON.
    pub fn log(&self, level: Level, message: &str, context: &Value) {
        if !self.enabled(level) {
            return;
        }
        let has_context = match context {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::Array(items) => !items.is_empty(),
            _ => true,
        };
        if has_context {
            log::log!(target: &self.channel, level, "{} {}", message, context);
        } else {
            log::log!(target: &self.channel, level, "{}", message);
        }
    }

    pub fn debug(&self, message: &str, context: &Value) {
        self.log(Level::Debug, message, context);
    }

    pub fn info(&self, message: &str, context: &Value) {
        self.log(Level::Info, message, context);
    }

    pub fn warning(&self, message: &str, context: &Value) {
        self.log(Level::Warn, message, context);
    }

    pub fn error(&self, message: &str, context: &Value) {
        self.log(Level::Error, message, context);
    }

    /// Install a `tracing` fmt subscriber on stderr, filtered at this manager's
    /// level (`RUST_LOG` wins), and route `log` records into it.
    ///
    /// Returns false when a global subscriber was already installed.
    pub fn install_subscriber(&self) -> bool {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.to_string().to_ascii_lowercase()));
        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();

        // With tracing-subscriber's log feature the bridge is already set by try_init.
        if let Err(e) = tracing_log::LogTracer::init() {
            log::trace!("log bridge not installed: {}", e);
        }
        if !installed {
            log::debug!("A tracing subscriber is already installed, keeping it");
        }
        installed
    }
}
