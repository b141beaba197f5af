#![cfg(test)]

use std::path::Path;
use std::sync::Arc;

use serde_json::json;

use crate::config::Configurator;
use crate::container::Service;
use crate::event::{EventDispatcher, NamedEvent};
use crate::kernel::bootstrap::Kernel;
use crate::services::{
    AssetManager, Cipher, DatabaseManager, Encrypter, LogManager, Request, Router, SessionManager,
};
use crate::storage::StorageManager;

use super::common::{boot_fixture_app, write_fixture_app, APP_KEY};

#[tokio::test]
async fn test_fixture_configuration_is_loaded() {
    let (_dir, app) = boot_fixture_app().await;
    let config = app.container().get::<Configurator>().unwrap();

    assert_eq!(config.get_str("app.name").as_deref(), Some("Fixture"));
    assert_eq!(config.get_str("app_url").as_deref(), Some("https://hearth.test"));
    assert_eq!(config.get_str("charset").as_deref(), Some("UTF-8"));
    assert!(config.get_str("timezone").is_some());
}

#[tokio::test]
async fn test_services_follow_configuration() {
    let (dir, app) = boot_fixture_app().await;
    let container = app.container();

    let assets = container.get::<AssetManager>().unwrap();
    assert_eq!(assets.url("app.css").unwrap(), "https://hearth.test/static/css/app.css");

    let database = container.get::<DatabaseManager>().unwrap();
    assert_eq!(database.default_connection_name(), "main");
    assert_eq!(database.table("posts").to_sql(), "SELECT * FROM wp_posts");

    let log = container.get::<LogManager>().unwrap();
    assert_eq!(log.channel(), "fixture");
    assert_eq!(log.level(), log::LevelFilter::Debug);

    let router = container.get::<Router>().unwrap();
    assert_eq!(router.names(), vec!["archive", "home", "post"]);
    let matched = router.match_path("GET", "/posts/7").unwrap();
    assert_eq!(matched.name, "post");

    let storage = container.get::<StorageManager>().unwrap();
    assert_eq!(storage.default_disk_name(), "uploads");
    let disk = storage.default_disk().unwrap();
    assert_eq!(disk.root(), dir.path().join("public/uploads"));
    disk.write_string(Path::new("notes/hello.txt"), "hi").unwrap();
    assert_eq!(disk.read_to_string(Path::new("notes/hello.txt")).unwrap(), "hi");
}

#[tokio::test]
async fn test_encrypter_uses_env_key_and_cipher() {
    let (_dir, app) = boot_fixture_app().await;
    let encrypter = app.container().get::<Encrypter>().unwrap();
    assert_eq!(encrypter.cipher(), Cipher::XChaCha20Poly1305);

    let payload = encrypter.encrypt_string("secret").unwrap();
    let same_key = Encrypter::from_hex_key(Some(APP_KEY), Cipher::XChaCha20Poly1305).unwrap();
    assert_eq!(same_key.decrypt_string(&payload).unwrap(), "secret");
}

#[tokio::test]
async fn test_request_carries_started_session() {
    let (_dir, app) = boot_fixture_app().await;
    let request = app.container().get::<Request>().unwrap();
    assert_eq!(request.method(), "POST");
    assert_eq!(request.path(), "/posts/7");
    assert_eq!(request.query_params().get("draft").map(String::as_str), Some("1"));

    let sessions = app.container().get::<SessionManager>().unwrap();
    assert!(sessions.is_started());
    assert_eq!(sessions.token_id(), APP_KEY);

    let session = request.session().expect("session attached during boot");
    session.put("flash", json!("saved"));
    assert_eq!(sessions.processor().unwrap().get("flash"), Some(json!("saved")));
}

#[tokio::test]
async fn test_event_dispatcher_is_shared() {
    let (_dir, app) = boot_fixture_app().await;
    let by_type = app.container().get::<EventDispatcher>().unwrap();
    let by_alias = app.container().get_as::<EventDispatcher>("event").unwrap();
    assert!(Arc::ptr_eq(&by_type, &by_alias));

    by_alias
        .push(Box::new(NamedEvent::new("post.saved", json!({"id": 7}))))
        .await;
    assert_eq!(by_type.queue_size().await, 1);
    assert_eq!(by_type.flush().await, 1);
}

#[tokio::test]
async fn test_configured_providers_are_added() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_app(dir.path());
    std::fs::write(
        dir.path().join("config/app.json"),
        r#"{"providers": ["event", "routing", "log"]}"#,
    )
    .unwrap();

    let mut kernel = Kernel::builder(dir.path()).provider("http").build();
    kernel.boot().await.unwrap();

    let app = kernel.app().unwrap();
    let names: Vec<&str> = app.container().providers().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["http", "event", "routing", "log"]);
    assert!(app.container().has(Router::ID));
    assert!(!app.container().has(AssetManager::ID));
}
