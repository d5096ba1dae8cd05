#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! These tests ensure that the CLI binary starts correctly and
//! responds to basic commands without crashing. Each run points
//! `XDG_CONFIG_HOME` at a temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn babel(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("babel").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("BABEL_LOG");
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("babel");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    babel(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("summarization and translation"))
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    babel(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_languages_list() {
    let home = TempDir::new().unwrap();
    babel(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("English"))
        .stdout(predicate::str::contains("pt"))
        .stdout(predicate::str::contains("Turkish"));
}

#[test]
fn test_providers_list_without_config() {
    let home = TempDir::new().unwrap();
    babel(&home)
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("No providers configured"));
}

#[test]
fn test_providers_list_shows_capabilities() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        r#"
[babel]
provider = "ollama"
model = "gemma3:12b"

[providers.ollama]
endpoint = "http://localhost:11434"

[capabilities.detector]
enabled = false
"#,
    );

    babel(&home)
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("ollama (default)"))
        .stdout(predicate::str::contains("summarizer  ollama/gemma3:12b"))
        .stdout(predicate::str::contains("not available"));
}

#[test]
fn test_providers_show_unknown_provider() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        "[providers.ollama]\nendpoint = \"http://localhost:11434\"\n",
    );

    babel(&home)
        .args(["providers", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_language_code() {
    let home = TempDir::new().unwrap();
    babel(&home)
        .args(["--to", "invalid_lang_xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid language code"));
}

#[test]
fn test_broken_config_is_reported() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[babel\nprovider = ");

    babel(&home)
        .arg("chat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_chat_help() {
    let home = TempDir::new().unwrap();
    babel(&home)
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--to"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--model"));
}
