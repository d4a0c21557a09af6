// SPDX-License-Identifier: Apache-2.0

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::net::TcpListener;

fn refused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("labsync");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("labsync"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("labsync");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("issues"))
        .stdout(predicate::str::contains("milestones"))
        .stdout(predicate::str::contains("members"))
        .stdout(predicate::str::contains("issue"))
        .stdout(predicate::str::contains("upload"));
}

#[test]
fn test_issues_help_lists_filters() {
    let mut cmd = cargo_bin_cmd!("labsync");
    cmd.args(["issues", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--assignee"))
        .stdout(predicate::str::contains("--milestone"))
        .stdout(predicate::str::contains("--label"))
        .stdout(predicate::str::contains("--state"));
}

#[test]
fn test_missing_repository_url() {
    let config_home = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("labsync");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("LABSYNC_REPOSITORY__URL")
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("repository.url is not set"));
}

#[test]
fn test_invalid_project_url() {
    let config_home = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("labsync");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("LABSYNC_REPOSITORY__PASSWORD", "glpat-unused")
        .args(["--repo", "not a url", "--private-token", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project URL"));
}

#[test]
fn test_connection_refused() {
    let config_home = tempfile::tempdir().unwrap();
    let url = format!("http://127.0.0.1:{}/tools/labsync", refused_port());
    let mut cmd = cargo_bin_cmd!("labsync");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("LABSYNC_REPOSITORY__PASSWORD", "glpat-unused")
        .args(["--repo", url.as_str(), "--private-token", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection refused"));
}

#[test]
fn test_invalid_label_pattern() {
    let config_home = tempfile::tempdir().unwrap();
    let url = format!("http://127.0.0.1:{}/tools/labsync", refused_port());
    let mut cmd = cargo_bin_cmd!("labsync");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .args(["--repo", url.as_str(), "issues", "--label", "("])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid issue query"));
}
