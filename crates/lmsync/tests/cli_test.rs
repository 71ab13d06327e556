//! Integration tests for the `lmsync` CLI binary.
//!
//! Validate argument parsing, help output, and the offline `validate`
//! command; nothing here requires a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `lmsync` binary with env isolation.
///
/// Clears all `LMSYNC_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn lmsync_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("lmsync");
    cmd.env("HOME", "/tmp/lmsync-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/lmsync-cli-test-nonexistent")
        .env_remove("LMSYNC_CONFIG")
        .env_remove("LMSYNC_OUTPUT");
    cmd
}

const MANIFEST: &str = r#"
[[collectors]]
description = "collector-1.example.com"
account = "acme"

[[device_groups]]
full_path = "/network/switches"
account = "acme"

[[devices]]
hostname = "sw1.example.com"
collector = "collector-1.example.com"
groups = ["/network/switches"]
account = "acme"
"#;

fn write_manifest(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
    let path = dir.path().join("site.toml");
    std::fs::write(&path, text).unwrap();
    path
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let output = lmsync_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage' in:\n{stderr}");
}

#[test]
fn help_lists_subcommands() {
    lmsync_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("apply")
            .and(predicate::str::contains("destroy"))
            .and(predicate::str::contains("validate")),
    );
}

#[test]
fn version_flag() {
    lmsync_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lmsync"));
}

// ── validate ────────────────────────────────────────────────────────

#[test]
fn validate_summarizes_a_good_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    lmsync_cmd()
        .args(["validate", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("1 devices")
                .and(predicate::str::contains("1 device groups"))
                .and(predicate::str::contains("acme")),
        );
}

#[test]
fn validate_quiet_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    lmsync_cmd()
        .args(["validate", "-q", "-f"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn validate_rejects_a_relative_group_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(
        &dir,
        r#"
        [[device_groups]]
        full_path = "network/switches"
        account = "acme"
        "#,
    );

    let output = lmsync_cmd()
        .args(["validate", "-f"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("could not load manifest"),
        "stderr:\n{stderr}"
    );
}

#[test]
fn validate_missing_file_fails() {
    let output = lmsync_cmd()
        .args(["validate", "-f", "/nonexistent/site.toml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn apply_requires_a_manifest_argument() {
    let output = lmsync_cmd().arg("apply").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--file"), "stderr:\n{stderr}");
}

// ── apply without configuration ─────────────────────────────────────

#[test]
fn apply_without_config_reports_the_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    let output = lmsync_cmd()
        .args(["apply", "-f"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected config exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("could not load configuration"),
        "stderr:\n{stderr}"
    );
}
