//! Core types for classmark

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A student row loaded from the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Institutional identifier (primary key)
    pub identifier: String,
    /// GitHub username, if the student has linked one
    pub github_username: Option<String>,
    /// Additive deadline extension (zero when absent or unparsable)
    pub extra_time: TimeDelta,
    /// Every roster column in file order, passed through to the report
    pub fields: Vec<(String, String)>,
}

/// Branch kinds synchronized from student repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BranchKind {
    /// Default branch of newer repositories
    Main,
    /// Default branch of older repositories
    Master,
    /// Base branch created by GitHub Classroom for feedback pull requests
    Feedback,
}

impl BranchKind {
    /// All synchronized kinds
    pub const ALL: [Self; 3] = [Self::Main, Self::Master, Self::Feedback];

    /// Branch name suffix for this kind
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Master => "master",
            Self::Feedback => "feedback",
        }
    }

    /// Parse a remote branch name; anything else is not synchronized
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Whether this kind holds the student's submission
    pub const fn is_submission(self) -> bool {
        matches!(self, Self::Main | Self::Master)
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote-tracking branch fetched from a student repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBranch {
    /// Remote the branch came from (the student's GitHub username)
    pub owner: String,
    /// Which synchronized branch this is
    pub kind: BranchKind,
    /// Tip commit ID (hex)
    pub commit_id: String,
}

/// A local branch pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBranch {
    /// Branch name (without `refs/heads/`)
    pub name: String,
    /// Target commit ID (hex)
    pub commit_id: String,
}

/// A commit as seen by the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit ID (hex)
    pub id: String,
    /// Parent commit IDs, first parent is the mainline
    pub parents: Vec<String>,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// When the commit was authored, in the author's offset
    pub authored_at: DateTime<FixedOffset>,
}

impl Commit {
    /// The mainline parent, `None` for a root commit
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// A git remote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitRemote {
    /// Remote name (e.g., "origin")
    pub name: String,
    /// Remote URL
    pub url: String,
}

/// A repository hosted in the organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepository {
    /// Repository name (without owner)
    pub name: String,
    /// HTTPS clone URL
    pub clone_url: String,
    /// Whether the repository is private
    pub private: bool,
}

/// A pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// PR title
    pub title: String,
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Organization that owns the student and marking repositories
    pub organization: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// Submission status of one roster entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStatus {
    /// Institutional identifier
    pub identifier: String,
    /// A `-main` or `-master` branch exists for the student
    pub cloned: bool,
    /// The branch tip holds work pushed by the student
    pub submitted: bool,
    /// Authored time of the branch tip, when submitted
    pub commit_time: Option<DateTime<FixedOffset>>,
    /// Whether the tip is after the effective deadline, when submitted
    pub late: Option<bool>,
    /// Roster columns passed through unchanged
    pub fields: Vec<(String, String)>,
}

/// An entity a stage skipped or degraded, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    /// Branch, remote or student the anomaly concerns
    pub name: String,
    /// Human-readable reason
    pub reason: String,
}

impl SkippedEntity {
    /// Record an anomaly
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
