//! GitHub platform services
//!
//! The engine talks to the hosting platform only through [`PlatformService`],
//! so stages can be exercised against a mock.

mod factory;
mod github;

pub use factory::create_platform_service;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{PlatformConfig, PullRequest, RemoteRepository};
use async_trait::async_trait;

/// Platform service trait for repository and PR operations
///
/// All operations are scoped to the configured organization.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List repositories whose name starts with `prefix`
    async fn list_repositories(&self, prefix: &str) -> Result<Vec<RemoteRepository>>;

    /// Look a repository up by name
    async fn find_repository(&self, name: &str) -> Result<Option<RemoteRepository>>;

    /// Create a repository
    ///
    /// Fails with [`Error::AlreadyExists`](crate::error::Error::AlreadyExists)
    /// when the name is taken.
    async fn create_repository(&self, name: &str, private: bool) -> Result<RemoteRepository>;

    /// List all PRs (open and closed) on a repository
    async fn list_pull_requests(&self, repo: &str) -> Result<Vec<PullRequest>>;

    /// Create a PR
    ///
    /// Fails with [`Error::AlreadyExists`](crate::error::Error::AlreadyExists)
    /// when a PR for `head` is already open.
    async fn create_pr(&self, repo: &str, head: &str, base: &str, title: &str)
    -> Result<PullRequest>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
