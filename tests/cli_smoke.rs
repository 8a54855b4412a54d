use assert_cmd::prelude::*;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn both_sources_exit_with_code_1() {
    let mut cmd = Command::cargo_bin("chlog").unwrap();
    cmd.arg("--url")
        .arg("https://example.com/repo.git")
        .arg("--repo_path")
        .arg(".");
    let assert = cmd.assert().failure().code(1);
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("only specify a remote repo or a local repo"));
}

#[test]
fn neither_source_exits_with_code_1() {
    let mut cmd = Command::cargo_bin("chlog").unwrap();
    let assert = cmd.assert().failure().code(1);
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("must specify either a remote repo or a local repo"));
}

#[test]
fn local_path_without_repository_exits_with_code_1() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("chlog").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo_path")
        .arg(dir.path());
    let assert = cmd.assert().failure().code(1);
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.contains("No git repository found at that location"));
}

#[test]
fn malformed_date_bound_fails() {
    let dir = tempdir().unwrap();

    let mut cmd = Command::cargo_bin("chlog").unwrap();
    cmd.current_dir(dir.path())
        .arg("--repo_path")
        .arg(dir.path())
        .args(["--after", "2024-06-30"]);
    cmd.assert().failure();
}
