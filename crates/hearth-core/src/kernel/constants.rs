/// Application name
pub const APP_NAME: &str = "Hearth";

/// Application version
pub const APP_VERSION: &str = "1.0.0-dev";

/// Environment file read from the base path
pub const ENV_FILE: &str = ".env";

/// Configuration directory, relative to the base path
pub const CONFIG_DIR: &str = "config";

/// Default public directory, relative to the base path
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Default storage directory backing the `local` disk
pub const STORAGE_DIR: &str = "storage";

/// Charset seeded into the configuration
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Timezone used when neither config nor environment provide one
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Config key listing provider names to instantiate at boot
pub const PROVIDERS_CONFIG_KEY: &str = "app.providers";

/// Config key mapping extra aliases to service ids
pub const PROXY_CONFIG_KEY: &str = "proxy";
