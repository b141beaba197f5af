use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn write_app(base: &Path) {
    fs::write(base.join(".env"), "APP_URL=https://cli.test\nHEARTH_CLI_MARKER=present\n").unwrap();
    fs::create_dir_all(base.join("config")).unwrap();
    fs::write(
        base.join("config/app.json"),
        r#"{"name": "CLI Fixture", "workers": 4}"#,
    )
    .unwrap();
    fs::write(
        base.join("config/routing.json"),
        r#"{"routes": {"post": "/posts/{id}"}}"#,
    )
    .unwrap();
}

fn hearth(base: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hearth").unwrap();
    cmd.arg("--base-path").arg(base).env_remove("APP_INSTALLING");
    cmd
}

#[test]
fn test_ping_command() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("hearth")?;
    cmd.arg("--ping");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("pong"));

    Ok(())
}

#[test]
fn test_no_args_boots() {
    let dir = tempdir().unwrap();
    write_app(dir.path());

    hearth(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("booted in"))
        .stdout(predicate::str::contains("pong").not());
}

#[test]
fn test_boot_reports_paths() {
    let dir = tempdir().unwrap();
    write_app(dir.path());

    hearth(dir.path())
        .arg("boot")
        .assert()
        .success()
        .stdout(predicate::str::contains("Public path:"))
        .stdout(predicate::str::contains("public"));
}

#[test]
fn test_installing_skips_boot() {
    let dir = tempdir().unwrap();
    write_app(dir.path());

    hearth(dir.path())
        .env("APP_INSTALLING", "true")
        .arg("boot")
        .assert()
        .success()
        .stdout(predicate::str::contains("Installation in progress"));
}

#[test]
fn test_services_lists_aliases_and_providers() {
    let dir = tempdir().unwrap();
    write_app(dir.path());

    hearth(dir.path())
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("hearth.database (database, db)"))
        .stdout(predicate::str::contains("routing [bootable]"))
        .stdout(predicate::str::contains("validation [standard]"));
}

#[test]
fn test_config_get() {
    let dir = tempdir().unwrap();
    write_app(dir.path());

    hearth(dir.path())
        .args(["config", "get", "app.name"])
        .assert()
        .success()
        .stdout("CLI Fixture\n");

    hearth(dir.path())
        .args(["config", "get", "app.workers"])
        .assert()
        .success()
        .stdout("4\n");

    hearth(dir.path())
        .args(["config", "get", "app.missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("app.missing"));
}

#[test]
fn test_env_get() {
    let dir = tempdir().unwrap();
    write_app(dir.path());

    hearth(dir.path())
        .args(["env", "get", "HEARTH_CLI_MARKER"])
        .assert()
        .success()
        .stdout("present\n");

    hearth(dir.path())
        .args(["env", "get", "HEARTH_CLI_NOT_SET"])
        .assert()
        .failure();
}

#[test]
fn test_route_url() {
    let dir = tempdir().unwrap();
    write_app(dir.path());

    hearth(dir.path())
        .args(["route", "post", "id=7", "page=2"])
        .assert()
        .success()
        .stdout("/posts/7?page=2\n");

    hearth(dir.path())
        .args(["route", "post", "id=7", "--absolute"])
        .assert()
        .success()
        .stdout("https://cli.test/posts/7\n");

    hearth(dir.path())
        .args(["route", "post"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("id"));
}

#[test]
fn test_key_generate() {
    let mut cmd = Command::cargo_bin("hearth").unwrap();
    cmd.args(["key", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[0-9a-f]{64}\n$").unwrap());

    let mut cmd = Command::cargo_bin("hearth").unwrap();
    cmd.args(["key", "generate", "--cipher", "rot13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("rot13"));
}
