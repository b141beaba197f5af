use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Configurator;
use crate::container::{Container, Service};
use crate::env::Env;
use crate::event::{EventDispatcher, KernelEvent};
use crate::kernel::constants::{APP_VERSION, DEFAULT_PUBLIC_DIR};
use crate::kernel::error::Result;
use crate::services::{
    AssetManager, DatabaseManager, Encrypter, LogManager, Request, Router, SessionManager,
    StorageManager, Validator,
};
use crate::utils::fs::normalize_path;

/// Base and public paths of the application, shared in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub base: PathBuf,
    pub public: PathBuf,
}

impl Service for AppPaths {
    const ID: &'static str = "hearth.paths";
}

/// Short names routed to canonical service ids by [`Application::register_aliases`].
pub const DEFAULT_ALIASES: &[(&str, &[&str])] = &[
    (AssetManager::ID, &["asset"]),
    (Configurator::ID, &["config"]),
    (DatabaseManager::ID, &["database", "db"]),
    (Encrypter::ID, &["crypt"]),
    (Env::ID, &["env"]),
    (EventDispatcher::ID, &["event"]),
    (LogManager::ID, &["log"]),
    (Request::ID, &["request"]),
    (Router::ID, &["router"]),
    (SessionManager::ID, &["session"]),
    (StorageManager::ID, &["storage"]),
    (Validator::ID, &["validator"]),
];

/// The application: its container, paths and environment.
pub struct Application {
    container: Arc<Container>,
    paths: Arc<AppPaths>,
    public_dir: String,
    env: Arc<Env>,
}

impl Application {
    /// Create the application for `base_path`. The public directory comes from
    /// `APP_PUBLIC_DIR` (default `public`). `Env` and [`AppPaths`] are shared
    /// in the new container.
    pub fn new(base_path: impl AsRef<Path>, env: Arc<Env>) -> Self {
        let base = normalize_path(base_path);
        let public_dir = env.get_or("APP_PUBLIC_DIR", DEFAULT_PUBLIC_DIR);
        let paths = Arc::new(AppPaths {
            public: normalize_path(base.join(&public_dir)),
            base,
        });

        let container = Arc::new(Container::new());
        container.instance_service(env.clone());
        container.instance_service(paths.clone());

        Self {
            container,
            paths,
            public_dir,
            env,
        }
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    pub fn base_path(&self) -> &Path {
        &self.paths.base
    }

    pub fn public_dir(&self) -> &str {
        &self.public_dir
    }

    pub fn public_path(&self) -> &Path {
        &self.paths.public
    }

    pub fn version(&self) -> &'static str {
        APP_VERSION
    }

    pub fn environment(&self) -> &Env {
        &self.env
    }

    /// Install [`DEFAULT_ALIASES`].
    pub fn register_aliases(&self) -> Result<()> {
        for (target, aliases) in DEFAULT_ALIASES {
            for alias in *aliases {
                self.container.alias(*alias, *target)?;
            }
        }
        // `url` needs no alias, it is the URL generator's own id.
        Ok(())
    }

    /// True when `APP_RUNNING_IN_CONSOLE` is `"true"`, or, when it is unset,
    /// when the program was invoked as `console` or `bee`.
    pub fn running_in_console(&self) -> bool {
        let argv0 = std::env::args_os().next();
        console_check(self.env.get("APP_RUNNING_IN_CONSOLE").as_deref(), argv0.as_deref())
    }

    /// Application boot hook, run last in the kernel boot sequence.
    pub async fn boot(&self) -> Result<()> {
        if self.container.has(EventDispatcher::ID) {
            self.container
                .get::<EventDispatcher>()?
                .dispatch(&KernelEvent::Booted)
                .await;
        }
        Ok(())
    }
}

pub(crate) fn console_check(flag: Option<&str>, argv0: Option<&OsStr>) -> bool {
    if let Some(flag) = flag {
        return flag == "true";
    }
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .is_some_and(|name| name == "console" || name == "bee")
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("base_path", &self.paths.base)
            .field("public_path", &self.paths.public)
            .field("container", &self.container)
            .finish()
    }
}
