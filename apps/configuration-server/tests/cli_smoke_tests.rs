#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the configuration-server binary
//!
//! These tests cover help output, configuration validation and printing of
//! the effective configuration. None of them start the gRPC server.

use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Helper to run the configuration-server binary with given arguments
fn run_configuration_server(args: &[&str], envs: &[(&str, &str)]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_configuration-server"))
        .args(args)
        .envs(envs.iter().copied())
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute configuration-server")
}

#[test]
fn test_cli_help_command() {
    let output = run_configuration_server(&["--help"], &[]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--dsn"), "Should mention dsn option");
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_configuration_server(&["--config", "/nonexistent/config.yaml", "check"], &[]);

    assert!(!output.status.success(), "Missing config file should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config file does not exist"),
        "Should explain the missing file: {stderr}"
    );
}

#[test]
fn test_cli_check_with_sqlite_dsn() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "server:\n  listen_addr: 127.0.0.1:50999\nconfiguration:\n  store_timeout_ms: 2000\n",
    )
    .unwrap();

    let output = run_configuration_server(
        &[
            "--config",
            config_path.to_str().unwrap(),
            "--dsn",
            "sqlite::memory:",
            "check",
        ],
        &[],
    );

    assert!(output.status.success(), "Check should succeed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));
    assert!(stdout.contains("127.0.0.1:50999"));
    assert!(stdout.contains("2000"));
}

#[test]
fn test_cli_print_config_masks_password() {
    let output = run_configuration_server(
        &["--print-config"],
        &[("DB_USER", "svc"), ("DB_PASSWORD", "hunter2"), ("DB_HOST", "db.internal")],
    );

    assert!(output.status.success(), "Print config should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Effective configuration"));
    assert!(stdout.contains("db.internal"));
    assert!(!stdout.contains("hunter2"), "Password must be masked");
}

#[test]
fn test_cli_invalid_command() {
    let output = run_configuration_server(&["definitely-not-a-command"], &[]);
    assert!(!output.status.success(), "Unknown subcommand should fail");
}
