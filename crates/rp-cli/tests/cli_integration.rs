//! CLI integration tests
//!
//! Tests the rportcli binary using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;

const API_ENV_VARS: [&str; 5] = [
    "RPORT_API_URL",
    "RPORT_API_USER",
    "RPORT_API_PASSWORD",
    "RPORT_API_TOKEN",
    "RPORT_CONFIG_PATH",
];

/// Binary with a private config file and no inherited credentials
fn rportcli(config_dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rportcli")
        .expect("Failed to locate rportcli binary - ensure it's built before running tests");
    for var in API_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd.env("RPORT_CONFIG_PATH", config_dir.path().join("config.toml"));
    cmd
}

fn config_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

#[test]
fn test_cli_help() {
    let dir = config_dir();
    rportcli(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("rportcli"))
        .stdout(predicate::str::contains("rport remote management server"));
}

#[test]
fn test_cli_version() {
    let dir = config_dir();
    rportcli(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rportcli"));
}

#[test]
fn test_cli_command_help() {
    let dir = config_dir();
    rportcli(&dir)
        .args(["command", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--cids"))
        .stdout(predicate::str::contains("--names"))
        .stdout(predicate::str::contains("--timeout"))
        .stdout(predicate::str::contains("--interpreter"));
}

#[test]
fn test_cli_script_help() {
    let dir = config_dir();
    rportcli(&dir)
        .args(["script", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--interpreter"));
}

#[test]
fn test_cli_unknown_command() {
    let dir = config_dir();
    rportcli(&dir)
        .arg("nonexistent-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_cli_command_requires_command() {
    let dir = config_dir();
    rportcli(&dir)
        .args(["command", "--cids", "c1"])
        .assert()
        .failure();
}

#[test]
fn test_cli_command_without_targets() {
    let dir = config_dir();
    rportcli(&dir)
        .args(["command", "-c", "uptime"])
        .env("RPORT_API_URL", "http://127.0.0.1:9")
        .env("RPORT_API_TOKEN", "test-token")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no client ids, names or search provided",
        ));
}

#[test]
fn test_cli_command_with_blank_ids() {
    let dir = config_dir();
    rportcli(&dir)
        .args(["command", "-c", "uptime", "-d", ","])
        .env("RPORT_API_URL", "http://127.0.0.1:9")
        .env("RPORT_API_TOKEN", "test-token")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no client ids, names or search provided",
        ));
}

#[test]
fn test_cli_command_with_empty_command() {
    let dir = config_dir();
    rportcli(&dir)
        .args(["command", "-c", "", "-d", "c1"])
        .env("RPORT_API_URL", "http://127.0.0.1:9")
        .env("RPORT_API_TOKEN", "test-token")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no command or script to run"));
}

#[test]
fn test_cli_command_without_credentials() {
    let dir = config_dir();
    rportcli(&dir)
        .args(["command", "-c", "uptime", "--cids", "c1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no credentials configured"));
}

#[test]
fn test_cli_config_path() {
    let dir = config_dir();
    let expected = dir.path().join("config.toml");
    rportcli(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn test_cli_config_init_then_show() {
    let dir = config_dir();

    rportcli(&dir)
        .args(["config", "init"])
        .env("RPORT_API_URL", "https://rport.example.com")
        .env("RPORT_API_TOKEN", "very-secret")
        .assert()
        .success();
    assert!(dir.path().join("config.toml").exists());

    rportcli(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://rport.example.com"))
        .stdout(predicate::str::contains("very-secret").not());
}
