#![cfg(test)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use crate::kernel::application::Application;
use crate::kernel::bootstrap::Kernel;

/// Hex key shared by the fixture `.env` and the assertions.
pub const APP_KEY: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// Lay out a small application: `.env`, a `config/` directory and a public dir.
pub fn write_fixture_app(base: &Path) {
    fs::write(
        base.join(".env"),
        format!(
            "APP_URL=https://hearth.test\nAPP_KEY={}\nAPP_CIPHER=xchacha20-poly1305\nREQUEST_METHOD=post\nREQUEST_URI=/posts/7?draft=1\n",
            APP_KEY
        ),
    )
    .unwrap();

    let config = base.join("config");
    fs::create_dir_all(&config).unwrap();
    fs::create_dir_all(base.join("public")).unwrap();

    fs::write(
        config.join("app.json"),
        r#"{"name": "Fixture", "providers": []}"#,
    )
    .unwrap();
    fs::write(
        config.join("asset.json"),
        r#"{"dir": "static", "entries": {"app.css": "css/app.css"}}"#,
    )
    .unwrap();
    fs::write(
        config.join("database.json"),
        r#"{"default": "main", "connections": {"main": {"driver": "sqlite", "url": "sqlite::memory:", "prefix": "wp_"}}}"#,
    )
    .unwrap();
    fs::write(
        config.join("filesystem.json"),
        r#"{"default": "uploads", "disks": {"uploads": {"root": "public/uploads"}}}"#,
    )
    .unwrap();
    fs::write(
        config.join("log.json"),
        r#"{"channel": "fixture", "level": "debug"}"#,
    )
    .unwrap();
    fs::write(
        config.join("routing.json"),
        r#"{"routes": {"home": "/", "post": {"path": "/posts/{id}", "method": "get"}, "archive": "/archive/{year?}"}}"#,
    )
    .unwrap();
}

/// Boot the fixture application with every built-in provider.
pub async fn boot_fixture_app() -> (TempDir, Arc<Application>) {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_app(dir.path());

    let mut kernel = Kernel::builder(dir.path()).with_default_providers().build();
    kernel.boot().await.expect("fixture application should boot");
    let app = kernel.app().unwrap();
    (dir, app)
}
