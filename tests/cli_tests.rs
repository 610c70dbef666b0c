//! CLI tests for the classmark binary

#![allow(deprecated)] // cargo_bin is the standard way to test CLI binaries

mod common;

use assert_cmd::Command;
use common::TempGitRepo;
use predicates::prelude::*;
use std::fs;

const CONFIG: &str = r#"
[github]
organization = "uni-cs"
assignment_prefix = "cw1"
marking_repo = "cw1-marking"

[roster]
path = "roster.csv"

[deadline]
cutoff = "2021-05-26T12:00:00+01:00"
"#;

const ROSTER: &str = "identifier,github_username,extra_time\ns1,alice,\ns2,bob,30\n";

fn classmark() -> Command {
    let mut cmd = Command::cargo_bin("classmark").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// A git repository holding `classmark.toml` and `roster.csv`
fn configured_repo() -> Option<TempGitRepo> {
    let repo = TempGitRepo::new()?;
    fs::write(repo.path().join("classmark.toml"), CONFIG).unwrap();
    fs::write(repo.path().join("roster.csv"), ROSTER).unwrap();
    Some(repo)
}

#[test]
fn test_cli_help() {
    classmark()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub Classroom"))
        .stdout(predicate::str::contains("impose-deadline"))
        .stdout(predicate::str::contains("pull-requests"));
}

#[test]
fn test_cli_version() {
    classmark()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_push_help_lists_flags() {
    classmark()
        .args(["push", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_auth_setup_needs_no_config() {
    let dir = tempfile::tempdir().unwrap();
    classmark()
        .current_dir(dir.path())
        .args(["auth", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("GITHUB_TOKEN"));
}

#[test]
fn test_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    classmark()
        .current_dir(dir.path())
        .arg("create-branches")
        .assert()
        .failure()
        .stderr(predicate::str::contains("classmark.toml not found"));
}

#[test]
fn test_missing_roster_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("classmark.toml"), CONFIG).unwrap();
    classmark()
        .current_dir(dir.path())
        .arg("create-report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("roster error"));
}

#[test]
fn test_report_before_branches_fails() {
    let Some(repo) = configured_repo() else {
        return;
    };
    classmark()
        .current_dir(repo.path())
        .arg("create-report")
        .assert()
        .failure()
        .stderr(predicate::str::contains("create-branches"));
}

#[test]
fn test_report_written_for_every_student() {
    let Some(repo) = configured_repo() else {
        return;
    };
    let tip = repo.commit("work", "alice", "2021-05-26T11:30:00+01:00");
    repo.git(&["branch", "s1-main", &tip]);

    classmark()
        .current_dir(repo.path())
        .args(["create-report", "--output", "out.csv"])
        .assert()
        .success();

    let report = fs::read_to_string(repo.path().join("out.csv")).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines,
        vec![
            "identifier,github_username,extra_time,cloned,submitted,commit_time,late",
            "s1,alice,,true,true,2021-05-26T11:30:00+01:00,false",
            "s2,bob,30,false,false,,",
        ]
    );
}

#[test]
fn test_impose_deadline_writes_mark_branch() {
    let Some(repo) = configured_repo() else {
        return;
    };
    let early = repo.commit("start", "alice", "2021-05-26T11:00:00+01:00");
    let late = repo.commit("finish", "alice", "2021-05-26T13:00:00+01:00");
    repo.git(&["branch", "s1-main", &late]);

    classmark()
        .current_dir(repo.path())
        .arg("impose-deadline")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 mark branches created"));

    assert_eq!(repo.git(&["rev-parse", "s1-mark"]), early);
}
