//! Integration tests for the `surefly` CLI binary.
//!
//! These tests validate argument parsing, help output, shell
//! completions, and error handling — all without a live API. End-to-end
//! flows against a mocked API run through the `--api-url` override.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// A token that passes the shape check.
fn fake_token() -> String {
    "a".repeat(360)
}

/// Build a `Command` for the `surefly` binary with env isolation.
///
/// Clears all `SUREFLY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn surefly_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("surefly");
    cmd.env("HOME", "/tmp/surefly-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/surefly-cli-test-nonexistent")
        .env_remove("SUREFLY_PROFILE")
        .env_remove("SUREFLY_TOKEN")
        .env_remove("SUREFLY_EMAIL")
        .env_remove("SUREFLY_PASSWORD")
        .env_remove("SUREFLY_API_URL")
        .env_remove("SUREFLY_OUTPUT")
        .env_remove("SUREFLY_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = surefly_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    surefly_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Sure Petcare")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("pets"))
            .and(predicate::str::contains("locking"))
            .and(predicate::str::contains("position")),
    );
}

#[test]
fn test_version_flag() {
    surefly_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("surefly"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    surefly_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    surefly_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = surefly_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_devices_list_no_credentials() {
    let output = surefly_cmd().args(["devices", "list"]).output().unwrap();
    assert_eq!(
        output.status.code(),
        Some(3),
        "Expected auth exit code without credentials"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("token") || text.contains("credentials"),
        "Expected credential hint:\n{text}"
    );
}

#[test]
fn test_token_requires_credentials() {
    let output = surefly_cmd()
        .args(["--token", &fake_token(), "token"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "token command must not run on a bare token"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("email") || text.contains("password"),
        "Expected credential requirement:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = surefly_cmd()
        .args(["--output", "invalid", "devices", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_curfew_time_validation() {
    let output = surefly_cmd()
        .args([
            "--token",
            &fake_token(),
            "locking",
            "curfew",
            "42",
            "--lock-time",
            "25:00",
            "--unlock-time",
            "07:00",
        ])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(2),
        "Expected usage exit code for bad curfew time"
    );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_devices_subcommands_exist() {
    surefly_cmd()
        .args(["devices", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("assign-tag")),
        );
}

#[test]
fn test_locking_subcommands_exist() {
    surefly_cmd()
        .args(["locking", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lock")
                .and(predicate::str::contains("unlock"))
                .and(predicate::str::contains("curfew")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    surefly_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("profiles")),
        );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the defaults.
    surefly_cmd().args(["config", "show"]).assert().success();
}

// ── End-to-end against a mocked API ─────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_locking_lock_success_exits_zero() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/device/42/control"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "locking": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api_url = format!("{}/api", server.uri());
    surefly_cmd()
        .args([
            "--token",
            &fake_token(),
            "--api-url",
            &api_url,
            "locking",
            "lock",
            "42",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("locked"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_locking_lock_forbidden_exits_nonzero() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/device/42/control"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let api_url = format!("{}/api", server.uri());
    let output = surefly_cmd()
        .args([
            "--token",
            &fake_token(),
            "--api-url",
            &api_url,
            "locking",
            "lock",
            "42",
        ])
        .output()
        .unwrap();

    assert!(!output.status.success(), "403 must exit non-zero");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pets_list_json_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/pet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 7,
                "name": "Mia",
                "household_id": 2,
                "position": { "where": 1, "since": "2024-06-15T10:30:00+00:00" }
            }]
        })))
        .mount(&server)
        .await;

    let api_url = format!("{}/api", server.uri());
    surefly_cmd()
        .args([
            "--token",
            &fake_token(),
            "--api-url",
            &api_url,
            "--output",
            "json",
            "pets",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Mia\"").and(predicate::str::contains("Inside")));
}
