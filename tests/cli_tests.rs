//! Integration tests for the demo binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn layercfg(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("layercfg"));
    cmd.current_dir(tmp.path()).env_remove("RUST_LOG");
    // Variables the demo schema reads must not leak in from the test runner.
    for var in [
        "NAME",
        "PORT",
        "REQUEST_TIMEOUT_SECS",
        "DEBUG",
        "DATABASE.URL",
        "DATABASE.POOL_SIZE",
        "DATABASE.PASSWORD",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_version() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = layercfg(&tmp);
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("layercfg"));
}

#[test]
fn test_cli_help_lists_described_switches() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = layercfg(&tmp);
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("layercfg (version"))
        .stdout(predicate::str::contains("--config <PATH>"))
        .stdout(predicate::str::contains("--request-timeout-secs"))
        .stdout(predicate::str::contains("--database-pool-size"))
        .stdout(predicate::str::contains("[default: 8080]"))
        .stdout(predicate::str::contains("password").not());
}

#[test]
fn test_cli_rejects_undescribed_switch() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = layercfg(&tmp);
    cmd.args(["--database-password", "x"]);
    cmd.assert().failure().stderr(predicate::str::contains("--database-password"));
}

#[test]
fn test_cli_prints_merged_config() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("layercfg.json"), r#"{"name": "from-file", "port": 1}"#)
        .expect("write");

    let mut cmd = layercfg(&tmp);
    cmd.args(["--port", "9090", "--debug"]).env("DATABASE.POOL_SIZE", "16");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("running with params:"))
        .stdout(predicate::str::contains(" - Name                      : from-file"))
        .stdout(predicate::str::contains(" - Port                      : 9090"))
        .stdout(predicate::str::contains(" - RequestTimeoutSecs        : 2.500000"))
        .stdout(predicate::str::contains(" - Debug                     : true"))
        .stdout(predicate::str::contains("    - PoolSize               : 16"));

    let snapshot = fs::read_to_string(tmp.path().join("layercfg.json")).expect("snapshot");
    assert!(snapshot.contains("\"port\": 9090"));
    assert!(snapshot.contains("\t\t\"pool_size\": 16"));
}

#[test]
fn test_cli_config_switch_and_bad_env() {
    let tmp = TempDir::new().expect("tmp");
    let mut cmd = layercfg(&tmp);
    cmd.args(["--config", "custom/settings.json"]).env("PORT", "not-a-port");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(" - Port                      : 8080"))
        .stderr(predicate::str::contains("PORT"));

    assert!(tmp.path().join("custom").join("settings.json").is_file());
    assert!(!tmp.path().join("layercfg.json").exists());
}
