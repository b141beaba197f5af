use std::ffi::OsStr;
use std::sync::Arc;

use tempfile::tempdir;

use crate::config::Configurator;
use crate::container::{ContainerError, Service};
use crate::env::Env;
use crate::kernel::application::{console_check, AppPaths, Application, DEFAULT_ALIASES};
use crate::kernel::constants::APP_VERSION;
use crate::kernel::error::Error;
use crate::services::DatabaseManager;

fn env(pairs: &[(&str, &str)]) -> Arc<Env> {
    Arc::new(Env::from_pairs(pairs.iter().copied()))
}

#[test]
fn test_paths() {
    let dir = tempdir().unwrap();
    let app = Application::new(dir.path(), env(&[]));

    assert_eq!(app.base_path(), dir.path());
    assert_eq!(app.public_dir(), "public");
    assert_eq!(app.public_path(), dir.path().join("public"));
    assert_eq!(app.version(), APP_VERSION);

    let paths = app.container().get::<AppPaths>().unwrap();
    assert_eq!(paths.base, dir.path());
    assert!(app.container().has(Env::ID));
}

#[test]
fn test_public_dir_from_env() {
    let dir = tempdir().unwrap();
    let app = Application::new(dir.path(), env(&[("APP_PUBLIC_DIR", "web/./htdocs")]));

    assert_eq!(app.public_dir(), "web/./htdocs");
    assert_eq!(app.public_path(), dir.path().join("web").join("htdocs"));
}

#[test]
fn test_register_aliases() {
    let dir = tempdir().unwrap();
    let app = Application::new(dir.path(), env(&[]));
    app.register_aliases().unwrap();

    let container = app.container();
    for (target, aliases) in DEFAULT_ALIASES {
        for alias in *aliases {
            assert_eq!(container.canonical(alias), *target);
        }
    }
    assert_eq!(container.canonical("db"), DatabaseManager::ID);
    assert_eq!(container.canonical("config"), Configurator::ID);

    // Aliases resolve only once something is bound behind them.
    assert!(matches!(
        container.get_any("config"),
        Err(Error::Container(ContainerError::NotFound { .. }))
    ));
}

#[test]
fn test_console_detection() {
    assert!(console_check(Some("true"), None));
    assert!(!console_check(Some("false"), Some(OsStr::new("/usr/bin/console"))));
    assert!(console_check(None, Some(OsStr::new("/srv/app/console"))));
    assert!(console_check(None, Some(OsStr::new("bee"))));
    assert!(!console_check(None, Some(OsStr::new("/usr/bin/php"))));
    assert!(!console_check(None, None));
}

#[tokio::test]
async fn test_boot_without_dispatcher() {
    let dir = tempdir().unwrap();
    let app = Application::new(dir.path(), env(&[]));
    app.boot().await.unwrap();
}
