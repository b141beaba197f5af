use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use serde_json::Value;

use crate::config::error::ConfigError;
use crate::config::schema::kind_of;
use crate::config::{Configurator, Expect};
use crate::container::{Container, Service};
use crate::env::Env;
use crate::event::{EventDispatcher, KernelEvent};
use crate::kernel::application::Application;
use crate::kernel::constants::{
    self, CONFIG_DIR, DEFAULT_CHARSET, DEFAULT_TIMEZONE, PROVIDERS_CONFIG_KEY, PROXY_CONFIG_KEY,
};
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::kernel::global;
use crate::provider::builtin::BUILTIN_PROVIDERS;
use crate::provider::{ProviderCatalog, ProviderDefinition, ProviderError, ServiceProvider};
use crate::services::{Request, SessionManager};

/// Collects the kernel's inputs before the boot sequence runs.
#[derive(Debug)]
pub struct KernelBuilder {
    base_path: PathBuf,
    config: Vec<(String, Value)>,
    providers: Vec<ProviderDefinition>,
    catalog: ProviderCatalog,
    installing: bool,
    start_time: Option<SystemTime>,
    env: Option<Env>,
    install_global: bool,
}

impl KernelBuilder {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            config: Vec::new(),
            providers: Vec::new(),
            catalog: ProviderCatalog::with_builtins(),
            installing: false,
            start_time: None,
            env: None,
            install_global: false,
        }
    }

    /// Configuration override applied after the `config/` directory is loaded.
    pub fn config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.push((key.into(), value));
        self
    }

    /// Several overrides at once, from a JSON object.
    pub fn config_map(mut self, map: serde_json::Map<String, Value>) -> Self {
        self.config.extend(map);
        self
    }

    pub fn provider(mut self, definition: impl Into<ProviderDefinition>) -> Self {
        self.providers.push(definition.into());
        self
    }

    pub fn providers<I, D>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<ProviderDefinition>,
    {
        self.providers.extend(definitions.into_iter().map(Into::into));
        self
    }

    /// Add every built-in provider, by name.
    pub fn with_default_providers(self) -> Self {
        self.providers(BUILTIN_PROVIDERS)
    }

    /// Replace the catalog `Named` definitions are looked up in.
    pub fn catalog(mut self, catalog: ProviderCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Abort the boot early, leaving the kernel unbooted.
    pub fn installing(mut self, installing: bool) -> Self {
        self.installing = installing;
        self
    }

    /// Record this instead of the current time as the boot start.
    pub fn start_time(mut self, start_time: SystemTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Use this environment instead of loading `<base_path>/.env`.
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    /// Install the booted application as the process-wide instance.
    pub fn install_global(mut self, install: bool) -> Self {
        self.install_global = install;
        self
    }

    pub fn build(self) -> Kernel {
        Kernel {
            builder: self,
            started_at: None,
            app: None,
            bootable: Vec::new(),
            booted: false,
        }
    }
}

/// Runs the boot sequence and owns the booted [`Application`].
#[derive(Debug)]
pub struct Kernel {
    builder: KernelBuilder,
    started_at: Option<(Instant, SystemTime)>,
    app: Option<Arc<Application>>,
    bootable: Vec<Arc<dyn ServiceProvider>>,
    booted: bool,
}

impl Kernel {
    pub fn builder(base_path: impl Into<PathBuf>) -> KernelBuilder {
        KernelBuilder::new(base_path)
    }

    /// Boot the application. Runs once; later calls return `Ok(())` without
    /// doing anything.
    pub async fn boot(&mut self) -> Result<()> {
        if self.booted {
            log::debug!("Kernel already booted, skipping");
            return Ok(());
        }

        self.started_at = Some((
            Instant::now(),
            self.builder.start_time.unwrap_or_else(SystemTime::now),
        ));
        self.app = None;
        self.bootable.clear();

        if self.is_installing() {
            log::info!("Installation in progress, boot aborted");
            return Ok(());
        }

        log::info!("Booting {} v{}", constants::APP_NAME, constants::APP_VERSION);

        let env = self.boot_env()?;
        let app = Arc::new(Application::new(&self.builder.base_path, env));
        log::debug!("Application base path: {}", app.base_path().display());

        self.boot_config(&app)
            .map_err(|e| e.in_phase(KernelLifecyclePhase::Config, "Failed to build configuration"))?;
        self.boot_container(&app)
            .map_err(|e| e.in_phase(KernelLifecyclePhase::Container, "Failed to build service container"))?;
        self.boot_proxies(&app)
            .map_err(|e| e.in_phase(KernelLifecyclePhase::Proxies, "Failed to register proxies"))?;
        self.boot_services(&app)
            .await
            .map_err(|e| e.in_phase(KernelLifecyclePhase::Services, "Failed to boot service providers"))?;
        self.boot_session(&app);
        app.boot()
            .await
            .map_err(|e| e.in_phase(KernelLifecyclePhase::Services, "Application boot hook failed"))?;

        if self.builder.install_global {
            global::install(app.clone());
        }
        self.app = Some(app);
        self.booted = true;

        if let Some(elapsed) = self.elapsed() {
            log::info!("Kernel booted in {:?}", elapsed);
        }
        Ok(())
    }

    fn is_installing(&self) -> bool {
        if self.builder.installing {
            return true;
        }
        let flag = match &self.builder.env {
            Some(env) => env.get("APP_INSTALLING"),
            None => std::env::var("APP_INSTALLING").ok(),
        };
        flag.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    fn boot_env(&self) -> Result<Arc<Env>> {
        let env = match &self.builder.env {
            Some(env) => env.clone(),
            None => Env::load(&self.builder.base_path)
                .map_err(|e| e.in_phase(KernelLifecyclePhase::Env, "Failed to load environment"))?,
        };
        Ok(Arc::new(env))
    }

    /// Defaults, then `config/` files, then builder overrides.
    fn boot_config(&self, app: &Application) -> Result<()> {
        let env = app.environment();
        let config = Arc::new(Configurator::new());
        config.add_schema("app_url", Expect::String);
        config.add_schema("timezone", Expect::String);
        config.add_schema("charset", Expect::String);

        config.set_many([
            ("app_url", env.get("APP_URL").map_or(Value::Null, Value::String)),
            ("timezone", env.get("APP_TIMEZONE").map_or(Value::Null, Value::String)),
            ("charset", Value::String(DEFAULT_CHARSET.to_string())),
        ])?;

        let loaded = config.load_dir(&app.base_path().join(CONFIG_DIR))?;
        log::debug!("Loaded {} configuration file(s)", loaded);

        config.set_many(self.builder.config.iter().cloned())?;

        let timezone = config
            .get_str("timezone")
            .or_else(|| env.get("TZ").filter(|tz| !tz.is_empty()))
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        config.set("timezone", timezone)?;

        app.container().instance_service(config);
        Ok(())
    }

    fn boot_container(&mut self, app: &Application) -> Result<()> {
        let container = app.container();
        app.register_aliases()?;

        let mut definitions = self.builder.providers.clone();
        definitions.extend(configured_providers(&*container.get::<Configurator>()?)?);

        for definition in &definitions {
            let provider = definition.instantiate(&self.builder.catalog)?;
            log::debug!("Adding {} service provider '{}'", provider.kind(), provider.name());
            if provider.kind().is_bootable() {
                self.bootable.push(provider.clone());
            }
            container.add_service_provider(provider)?;
        }
        Ok(())
    }

    /// Extra aliases from the `proxy` section, then the alias table is frozen.
    fn boot_proxies(&self, app: &Application) -> Result<()> {
        let container = app.container();
        let proxies = container.get::<Configurator>()?.get(PROXY_CONFIG_KEY);
        if let Some(Value::Object(proxies)) = proxies {
            for (alias, value) in &proxies {
                let target = value.as_str().ok_or_else(|| ConfigError::SchemaViolation {
                    key: format!("{}.{}", PROXY_CONFIG_KEY, alias),
                    expected: Expect::String.to_string(),
                    found: kind_of(value).to_string(),
                })?;
                log::debug!("Proxy alias '{}' -> '{}'", alias, target);
                container.alias(alias.as_str(), target)?;
            }
        }
        container.freeze_aliases();
        Ok(())
    }

    async fn boot_services(&self, app: &Application) -> Result<()> {
        let container = app.container();
        if container.has(EventDispatcher::ID) {
            container
                .get::<EventDispatcher>()?
                .dispatch(&KernelEvent::Booting)
                .await;
        }

        for provider in &self.bootable {
            log::debug!("Booting service provider '{}'", provider.name());
            provider.boot(container).await.map_err(|e| ProviderError::BootFailed {
                name: provider.name().to_string(),
                source: Box::new(e),
            })?;
        }
        Ok(())
    }

    /// Start the session and attach it to the request. Failures are not fatal.
    fn boot_session(&self, app: &Application) {
        if let Err(e) = start_session(app.container()) {
            log::debug!("Session not started: {}", e);
        }
    }

    /// The booted application.
    pub fn app(&self) -> Result<Arc<Application>> {
        match &self.app {
            Some(app) if self.booted => Ok(app.clone()),
            _ => Err(Error::InstanceUnavailable { what: "Application" }),
        }
    }

    pub fn is_booted(&self) -> bool {
        self.booted
    }

    /// When the last boot started; `None` before `boot()` is called.
    pub fn start_time(&self) -> Option<SystemTime> {
        self.started_at.map(|(_, at)| at)
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|(instant, _)| instant.elapsed())
    }

    pub fn base_path(&self) -> &Path {
        &self.builder.base_path
    }
}

/// Provider definitions listed under `app.providers`.
fn configured_providers(config: &Configurator) -> Result<Vec<ProviderDefinition>> {
    match config.get(PROVIDERS_CONFIG_KEY) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(ProviderDefinition::from_config_value).collect(),
        Some(other) => Err(ProviderError::UnsupportedDefinition {
            definition: other.to_string(),
        }
        .into()),
    }
}

fn start_session(container: &Container) -> Result<()> {
    let session = container.get::<SessionManager>()?;
    let request = container.get::<Request>()?;
    request.set_session(session.start()?);
    Ok(())
}
