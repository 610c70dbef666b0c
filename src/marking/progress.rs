//! Progress reporting for the push and pull-requests stages
//!
//! The CLI prints these events; tests pass [`NoopProgress`].

use crate::error::Error;
use crate::types::PullRequest;
use async_trait::async_trait;
use std::fmt;

/// Orchestration phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Locating or creating the marking repository
    ResolvingRemote,
    /// Pushing branches to the marking remote
    Pushing,
    /// Planning which PRs to create
    Planning,
    /// Creating new PRs
    CreatingPrs,
    /// Orchestration complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolvingRemote => write!(f, "Resolving marking repository"),
            Self::Pushing => write!(f, "Pushing branches"),
            Self::Planning => write!(f, "Planning pull requests"),
            Self::CreatingPrs => write!(f, "Creating pull requests"),
            Self::Complete => write!(f, "Done"),
        }
    }
}

/// Push operation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    /// Push started
    Started,
    /// Push succeeded
    Success,
    /// Push failed; carries the git error text
    Failed(String),
}

impl fmt::Display for PushStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Success => write!(f, "pushed"),
            Self::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Receiver for push and pull-request events
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A new phase started
    async fn on_phase(&self, phase: Phase);

    /// Push to `remote` changed state
    async fn on_push(&self, remote: &str, branch_count: usize, status: PushStatus);

    /// Marking PR opened for `head`
    async fn on_pr_created(&self, head: &str, pr: &PullRequest);

    /// No PR opened for `head`
    async fn on_pr_skipped(&self, head: &str, reason: &str);

    /// A stage-ending error
    async fn on_error(&self, error: &Error);

    /// Free-form status line
    async fn on_message(&self, message: &str);
}

/// Discards every event
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_push(&self, _remote: &str, _branch_count: usize, _status: PushStatus) {}
    async fn on_pr_created(&self, _head: &str, _pr: &PullRequest) {}
    async fn on_pr_skipped(&self, _head: &str, _reason: &str) {}
    async fn on_error(&self, _error: &Error) {}
    async fn on_message(&self, _message: &str) {}
}
