//! Error scenario integration tests

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn notify_lab_bin(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notify-lab"));
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("NOTIFY_LAB_BACKEND")
        .env_remove("RUST_LOG");
    cmd
}

fn run(home: &Path, args: &[&str]) -> Output {
    notify_lab_bin(home)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn write_config(home: &Path, content: &str) {
    let dir = home.join("config").join("notify-lab");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "get", "unknown_key"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown key") && stderr.contains("Valid keys"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "set", "unknown_key", "value"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown_key"), "got: {}", stderr);
}

#[test]
fn config_set_invalid_backend() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "set", "backend", "fax"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid backend") && stderr.contains("notify-send"),
        "Expected error about invalid backend, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_boolean() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "set", "enabled", "maybe"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") && stderr.contains("false"),
        "Expected error about invalid boolean, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_channel() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "set", "blocked_channels", "channel_loud"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("channel_loud"), "got: {}", stderr);
}

#[test]
fn config_list_with_no_file() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["config", "list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("backend: (not set)"),
        "Expected config list output, got: {}",
        stdout
    );
}

#[test]
fn invalid_backend_flag_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["--backend", "fax", "status"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fax"), "got: {}", stderr);
}

#[test]
fn invalid_importance_is_usage_error() {
    let home = TempDir::new().unwrap();
    let output = run(home.path(), &["-b", "memory", "importance", "extreme"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("extreme"), "got: {}", stderr);
}

#[test]
fn invalid_backend_in_file_is_usage_error() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "backend = \"fax\"\n");

    let output = run(home.path(), &["status"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid backend"), "got: {}", stderr);
}

#[test]
fn cli_backend_overrides_file() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "backend = \"fax\"\n");

    let output = run(home.path(), &["-b", "memory", "status", "--json"]);
    assert!(output.status.success());
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), "enabled = \"not a bool\n");

    let output = notify_lab_bin(home.path())
        .args(["-v", "status", "--json"])
        .env("NOTIFY_LAB_BACKEND", "memory")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ignoring config"), "got: {}", stderr);
}
