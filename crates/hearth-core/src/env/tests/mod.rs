use std::fs;
use tempfile::tempdir;

use crate::env::Env;
use crate::kernel::error::Error;

#[test]
fn test_missing_env_file_is_swallowed() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let env = Env::load(temp_dir.path()).expect("missing .env must not be fatal");
    assert!(env.file_keys().is_empty());
    assert!(env.source().is_none());
}

#[test]
fn test_env_file_values_are_loaded() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::write(
        temp_dir.path().join(".env"),
        "HEARTH_TEST_URL=https://example.test\nHEARTH_TEST_QUOTED=\"two words\"\n# comment\n",
    )
    .unwrap();

    let env = Env::load(temp_dir.path()).expect("Env::load failed");
    assert_eq!(env.get("HEARTH_TEST_URL").as_deref(), Some("https://example.test"));
    assert_eq!(env.get("HEARTH_TEST_QUOTED").as_deref(), Some("two words"));
    assert_eq!(env.file_keys(), vec!["HEARTH_TEST_QUOTED".to_string(), "HEARTH_TEST_URL".to_string()]);
    assert_eq!(env.source(), Some(temp_dir.path().join(".env").as_path()));
}

#[test]
fn test_process_environment_wins_over_file() {
    // PATH is set in every test environment; the file value must not shadow it.
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join(".env"), "PATH=/from/env/file\n").unwrap();

    let env = Env::load(temp_dir.path()).expect("Env::load failed");
    let process_path = std::env::var("PATH").expect("PATH should be set");
    assert_eq!(env.get("PATH"), Some(process_path));
}

#[test]
fn test_malformed_env_file_is_fatal() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    fs::write(temp_dir.path().join(".env"), "VALID=1\nthis line is not valid\n").unwrap();

    match Env::load(temp_dir.path()) {
        Err(Error::Env(e)) => assert!(e.to_string().contains(".env")),
        other => panic!("Expected EnvError, got {:?}", other),
    }
}

#[test]
fn test_from_pairs_is_isolated() {
    let env = Env::from_pairs([("APP_URL", "http://localhost"), ("APP_DEBUG", "yes")]);
    assert_eq!(env.get_or("APP_URL", "none"), "http://localhost");
    assert_eq!(env.get_or("MISSING", "fallback"), "fallback");
    assert_eq!(env.get_bool("APP_DEBUG"), Some(true));
    // PATH exists in the process but an isolated lookup must not see it.
    assert!(!env.contains("PATH"));
}

#[test]
fn test_get_bool_rejects_garbage() {
    let env = Env::from_pairs([("A", "off"), ("B", "maybe")]);
    assert_eq!(env.get_bool("A"), Some(false));
    assert_eq!(env.get_bool("B"), None);
    assert_eq!(env.get_bool("C"), None);
}
