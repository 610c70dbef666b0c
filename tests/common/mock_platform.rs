//! In-memory GitHub organization
//!
//! Not every helper is used by every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use classmark::error::{Error, Result};
use classmark::platform::PlatformService;
use classmark::types::{PlatformConfig, PullRequest, RemoteRepository};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::time::Instant;

/// Call record for `create_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePrCall {
    pub repo: String,
    pub head: String,
    pub base: String,
    pub title: String,
    /// When the call was made, on tokio's (possibly paused) clock
    pub at: Instant,
}

/// Call record for `create_repository`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRepoCall {
    pub name: String,
    pub private: bool,
}

/// In-memory organization implementing `PlatformService`
///
/// State persists across calls, so a PR created in one run is listed in
/// the next. PR numbers count up from 1 and every write is recorded.
pub struct MockPlatformService {
    config: PlatformConfig,
    next_pr_number: AtomicU64,
    repositories: Mutex<Vec<RemoteRepository>>,
    pull_requests: Mutex<HashMap<String, Vec<PullRequest>>>,
    // Call tracking
    list_repositories_calls: Mutex<Vec<String>>,
    create_repo_calls: Mutex<Vec<CreateRepoCall>>,
    create_pr_calls: Mutex<Vec<CreatePrCall>>,
    // Error injection
    error_on_list_repositories: Mutex<Option<String>>,
    error_on_create_repo: Mutex<Option<String>>,
    error_on_create_pr: Mutex<Option<String>>,
    already_exists_heads: Mutex<HashSet<String>>,
}

impl MockPlatformService {
    /// Create a new mock for an organization
    pub fn new(organization: &str) -> Self {
        Self {
            config: PlatformConfig {
                organization: organization.to_string(),
                host: None,
            },
            next_pr_number: AtomicU64::new(1),
            repositories: Mutex::new(Vec::new()),
            pull_requests: Mutex::new(HashMap::new()),
            list_repositories_calls: Mutex::new(Vec::new()),
            create_repo_calls: Mutex::new(Vec::new()),
            create_pr_calls: Mutex::new(Vec::new()),
            error_on_list_repositories: Mutex::new(None),
            error_on_create_repo: Mutex::new(None),
            error_on_create_pr: Mutex::new(None),
            already_exists_heads: Mutex::new(HashSet::new()),
        }
    }

    // --- setup ---

    /// Add a repository to the organization
    pub fn add_repository(&self, name: &str) {
        self.repositories.lock().unwrap().push(RemoteRepository {
            name: name.to_string(),
            clone_url: format!("https://github.com/{}/{name}.git", self.config.organization),
            private: true,
        });
    }

    /// Add an existing PR on a repository
    pub fn add_pull_request(&self, repo: &str, pr: PullRequest) {
        self.pull_requests
            .lock()
            .unwrap()
            .entry(repo.to_string())
            .or_default()
            .push(pr);
    }

    // --- failures ---

    /// Make `list_repositories` return an error
    pub fn fail_list_repositories(&self, msg: &str) {
        *self.error_on_list_repositories.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_repository` return an error
    pub fn fail_create_repository(&self, msg: &str) {
        *self.error_on_create_repo.lock().unwrap() = Some(msg.to_string());
    }

    /// Fail every `create_pr` with a GitHub API error
    pub fn fail_create_pr(&self, msg: &str) {
        *self.error_on_create_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr` report that a PR for `head` already exists
    pub fn pr_already_exists(&self, head: &str) {
        self.already_exists_heads
            .lock()
            .unwrap()
            .insert(head.to_string());
    }

    // --- recorded calls ---

    /// Get all prefixes `list_repositories` was called with
    pub fn get_list_repositories_calls(&self) -> Vec<String> {
        self.list_repositories_calls.lock().unwrap().clone()
    }

    /// Get all `create_repository` calls
    pub fn get_create_repo_calls(&self) -> Vec<CreateRepoCall> {
        self.create_repo_calls.lock().unwrap().clone()
    }

    /// Recorded `create_pr` calls, oldest first
    pub fn get_create_pr_calls(&self) -> Vec<CreatePrCall> {
        self.create_pr_calls.lock().unwrap().clone()
    }

    /// Panic unless a PR from `head` into `base` was requested
    pub fn assert_create_pr_called(&self, head: &str, base: &str) {
        let calls = self.get_create_pr_calls();
        assert!(
            calls.iter().any(|c| c.head == head && c.base == base),
            "no create_pr({head} -> {base}) among {calls:?}"
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_repositories(&self, prefix: &str) -> Result<Vec<RemoteRepository>> {
        self.list_repositories_calls
            .lock()
            .unwrap()
            .push(prefix.to_string());

        if let Some(msg) = self.error_on_list_repositories.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        Ok(self
            .repositories
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn find_repository(&self, name: &str) -> Result<Option<RemoteRepository>> {
        Ok(self
            .repositories
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn create_repository(&self, name: &str, private: bool) -> Result<RemoteRepository> {
        self.create_repo_calls.lock().unwrap().push(CreateRepoCall {
            name: name.to_string(),
            private,
        });

        if let Some(msg) = self.error_on_create_repo.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.add_repository(name);
        Ok(RemoteRepository {
            name: name.to_string(),
            clone_url: format!("https://github.com/{}/{name}.git", self.config.organization),
            private,
        })
    }

    async fn list_pull_requests(&self, repo: &str) -> Result<Vec<PullRequest>> {
        Ok(self
            .pull_requests
            .lock()
            .unwrap()
            .get(repo)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_pr(
        &self,
        repo: &str,
        head: &str,
        base: &str,
        title: &str,
    ) -> Result<PullRequest> {
        self.create_pr_calls.lock().unwrap().push(CreatePrCall {
            repo: repo.to_string(),
            head: head.to_string(),
            base: base.to_string(),
            title: title.to_string(),
            at: Instant::now(),
        });

        if let Some(msg) = self.error_on_create_pr.lock().unwrap().as_ref() {
            return Err(Error::GitHubApi(msg.clone()));
        }

        if self.already_exists_heads.lock().unwrap().contains(head) {
            return Err(Error::AlreadyExists(format!(
                "A pull request already exists for {head}"
            )));
        }

        let number = self.next_pr_number.fetch_add(1, Ordering::SeqCst);
        let pr = PullRequest {
            number,
            html_url: format!(
                "https://github.com/{}/{repo}/pull/{number}",
                self.config.organization
            ),
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            title: title.to_string(),
        };
        self.add_pull_request(repo, pr.clone());
        Ok(pr)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
