//! Temporary git repositories driven by the git binary

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Whether the git binary can be run
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// A throwaway git repository with `main` as its initial branch
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Create a repository, or `None` when git is unavailable
    pub fn new() -> Option<Self> {
        if !git_available() {
            eprintln!("git not available, skipping");
            return None;
        }

        let repo = Self {
            dir: TempDir::new().unwrap(),
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/main"]);
        Some(repo)
    }

    /// Working tree path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run git in the repository and return trimmed stdout
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(self.path())
            .args(args)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Commit on the current branch with the given author and authored
    /// time (RFC 3339), returning the commit ID
    pub fn commit(&self, message: &str, author: &str, timestamp: &str) -> String {
        let output = Command::new("git")
            .current_dir(self.path())
            .args(["-c", "commit.gpgsign=false", "commit", "--quiet", "--allow-empty"])
            .args(["-m", message])
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GIT_AUTHOR_NAME", author)
            .env("GIT_AUTHOR_EMAIL", format!("{author}@example.edu"))
            .env("GIT_AUTHOR_DATE", timestamp)
            .env("GIT_COMMITTER_NAME", "Test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git commit failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        self.git(&["rev-parse", "HEAD"])
    }
}
