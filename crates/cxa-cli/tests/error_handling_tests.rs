//! Tests for error handling, suggestions, and exit codes.
//!
//! None of these reach the package manager: each run fails before the
//! first external command.

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// `cxa` running inside `temp` with an empty config file.
fn cxa(temp: &TempDir) -> assert_cmd::Command {
    let config = temp.path().join("cxa.toml");
    fs::write(&config, "").unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("cxa");
    cmd.current_dir(temp.path())
        .env_remove("CXA_DEFAULTS__TEMPLATE")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn test_missing_template_option() {
    let temp = TempDir::new().unwrap();
    cxa(&temp)
        .args(["init", "my-app"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--template option is missing."));

    assert!(!temp.path().join("my-app").exists());
}

#[test]
fn test_existing_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("my-app")).unwrap();
    fs::write(temp.path().join("my-app/keep.txt"), "mine").unwrap();

    cxa(&temp)
        .args(["init", "my-app", "--template", "file:./no-such-template"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(
        fs::read_to_string(temp.path().join("my-app/keep.txt")).unwrap(),
        "mine"
    );
}

#[test]
fn test_invalid_project_name() {
    let temp = TempDir::new().unwrap();
    cxa(&temp)
        .args(["init", ".hidden", "-t", "react"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid project name"));
}

#[test]
fn test_invalid_addon_name() {
    let temp = TempDir::new().unwrap();
    cxa(&temp)
        .args(["init", "my-app", "-t", "react", "--addon", "../escape"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid addon name"));
}

#[test]
fn test_missing_local_template() {
    let temp = TempDir::new().unwrap();
    cxa(&temp)
        .args(["init", "my-app", "-t", "file:./no-such-template"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("step: template-fetched"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!temp.path().join("my-app").exists());
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();
    cxa(&temp)
        .args(["config", "get", "defaults.nope"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_malformed_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.toml");
    fs::write(&config, "[defaults\npackage_manager = ").unwrap();

    let mut cmd = cargo::cargo_bin_cmd!("cxa");
    cmd.arg("--config")
        .arg(&config)
        .args(["config", "list"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}
