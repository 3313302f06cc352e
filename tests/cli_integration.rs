//! CLI integration tests
//!
//! Tests the wyvern-match-scan binary end-to-end for paths that fail or
//! finish before any network request is made

use assert_cmd::Command;
use predicates::prelude::*;

/// Binary with no ambient key and an empty config directory
fn scan() -> Command {
    let home = std::env::temp_dir().join("wyvern-match-scan-cli-tests");
    let mut cmd = Command::cargo_bin("wyvern-match-scan").unwrap();
    cmd.env_remove("INFURA_API_KEY")
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

// ==================== Basic CLI tests ====================

#[test]
fn test_version() {
    scan()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wyvern-match-scan"));
}

#[test]
fn test_help() {
    scan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("atomicMatch_"))
        .stdout(predicate::str::contains("--depth"));
}

#[test]
fn test_config_path() {
    scan()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wyvern-match-scan"))
        .stdout(predicate::str::contains("config.toml"));
}

// ==================== Configuration errors ====================

#[test]
fn test_zero_depth_rejected() {
    scan()
        .args(["-i", "key", "-d", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid depth"));
}

#[test]
fn test_missing_depth_rejected() {
    scan()
        .args(["-i", "key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("depth"));
}

#[test]
fn test_non_numeric_depth_rejected() {
    scan()
        .args(["-i", "key", "-d", "ten"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_key_rejected() {
    scan()
        .args(["-d", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Infura API key"));
}

#[test]
fn test_empty_key_rejected() {
    scan()
        .args(["-i", "", "-d", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Infura API key"));
}

#[test]
fn test_match_target_not_configurable() {
    scan()
        .args(["-i", "key", "-d", "1", "--selector", "deadbeef"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));

    scan()
        .args([
            "-i",
            "key",
            "-d",
            "1",
            "--target",
            "0x00000000006c3852cbEf3e08E8dF289169EdE581",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_zero_timeout_rejected() {
    scan()
        .args(["-i", "key", "-d", "1", "--timeout", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));
}

#[test]
fn test_unsupported_format_rejected() {
    scan()
        .args(["-i", "key", "-d", "1", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format"));
}

#[test]
fn test_invalid_rpc_url_rejected() {
    scan()
        .args(["--rpc", "not a url", "-d", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid RPC URL"));
}
