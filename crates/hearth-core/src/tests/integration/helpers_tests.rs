#![cfg(test)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Map};
use tempfile::tempdir;

use crate::container::ContainerError;
use crate::env::Env;
use crate::helpers::Helpers;
use crate::kernel::bootstrap::Kernel;
use crate::kernel::error::Error;
use crate::services::ServiceError;

use super::common::boot_fixture_app;

fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn test_config_helpers() {
    let (_dir, app) = boot_fixture_app().await;

    assert_eq!(app.config_value("app.name", json!("x")).unwrap(), json!("Fixture"));
    assert_eq!(app.config_value("app.missing", json!("x")).unwrap(), json!("x"));

    let mut values = Map::new();
    values.insert("app.name".to_string(), json!("Renamed"));
    values.insert("mail.from".to_string(), json!("noreply@hearth.test"));
    app.set_config(values).unwrap();

    let config = app.config().unwrap();
    assert_eq!(config.get_str("app.name").as_deref(), Some("Renamed"));
    assert_eq!(config.get_str("mail.from").as_deref(), Some("noreply@hearth.test"));
}

#[tokio::test]
async fn test_env_helper() {
    let (_dir, app) = boot_fixture_app().await;
    assert_eq!(app.env("APP_URL", "").unwrap(), "https://hearth.test");
    assert_eq!(app.env("HEARTH_SURELY_UNSET_VARIABLE", "fallback").unwrap(), "fallback");
}

#[tokio::test]
async fn test_route_helper() {
    let (_dir, app) = boot_fixture_app().await;

    assert_eq!(app.route("post", &params(&[("id", "7")]), false).unwrap(), "/posts/7");
    assert_eq!(
        app.route("post", &params(&[("id", "7"), ("page", "2")]), true).unwrap(),
        "https://hearth.test/posts/7?page=2"
    );
    assert_eq!(app.route("archive", &BTreeMap::new(), false).unwrap(), "/archive");
    assert!(matches!(
        app.route("post", &BTreeMap::new(), false),
        Err(Error::Service(ServiceError::MissingRouteParameter { .. }))
    ));
}

#[tokio::test]
async fn test_service_helpers() {
    let (_dir, app) = boot_fixture_app().await;

    assert_eq!(app.asset().unwrap().url("app.css").unwrap(), "https://hearth.test/static/css/app.css");
    assert_eq!(
        app.table("users").unwrap().select(["id", "email"]).where_eq("id").to_sql(),
        "SELECT id, email FROM wp_users WHERE id = ?"
    );
    assert_eq!(app.database().unwrap().default_connection_name(), "main");
    assert_eq!(app.logger().unwrap().channel(), "fixture");
    app.log_debug("helpers test", &json!({"ok": true})).unwrap();

    let payload = app.encrypter().unwrap().encrypt_string("hello").unwrap();
    assert_eq!(app.encrypter().unwrap().decrypt_string(&payload).unwrap(), "hello");

    assert_eq!(app.request().unwrap().method(), "POST");
    assert!(Arc::ptr_eq(&app.event().unwrap(), &app.event().unwrap()));

    let disk = app.disk("local").unwrap();
    disk.write_string(Path::new("cache/a.txt"), "a").unwrap();
    assert!(app.storage().unwrap().disk("local").unwrap().is_file(Path::new("cache/a.txt")));

    let session = app.session().unwrap();
    assert!(session.token().is_some());

    let data = json!({"email": "not-an-email", "name": "Ada"});
    let validation = app
        .validator()
        .unwrap()
        .validate(&data, [("email", "required|email"), ("name", "required")])
        .unwrap();
    assert!(validation.fails());
    assert_eq!(validation.failed("email"), ["email".to_string()]);
    assert!(validation.failed("name").is_empty());
}

#[tokio::test]
async fn test_helpers_without_providers() {
    let dir = tempdir().unwrap();
    let mut kernel = Kernel::builder(dir.path())
        .env(Env::from_pairs(Vec::<(String, String)>::new()))
        .build();
    kernel.boot().await.unwrap();
    let app = kernel.app().unwrap();

    assert!(app.config().is_ok());
    assert!(matches!(
        app.storage(),
        Err(Error::Container(ContainerError::NotFound { .. }))
    ));
    assert!(app.session().is_err());
}
