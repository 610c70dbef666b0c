//! GitHub platform service implementation

use crate::error::{Error, Result, status_code};
use crate::platform::PlatformService;
use crate::types::{PlatformConfig, PullRequest, RemoteRepository};
use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::params::State;
use serde::Serialize;
use tracing::debug;

const PER_PAGE: u8 = 100;

/// Body of `POST /orgs/{org}/repos`, which octocrab has no builder for
#[derive(Serialize)]
struct CreateRepoBody<'a> {
    name: &'a str,
    private: bool,
}

fn repository_from_octocrab(repo: octocrab::models::Repository) -> RemoteRepository {
    RemoteRepository {
        clone_url: repo
            .clone_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        private: repo.private.unwrap_or_default(),
        name: repo.name,
    }
}

fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        title: pr.title.as_deref().unwrap_or_default().to_string(),
    }
}

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, organization: String, host: Option<String>) -> Result<Self> {
        let base_uri = host.as_ref().map(|h| format!("https://{h}/api/v3"));
        Self::with_base_uri(token, organization, host, base_uri.as_deref())
    }

    /// Create a service against an explicit API base URI
    pub fn with_base_uri(
        token: &str,
        organization: String,
        host: Option<String>,
        base_uri: Option<&str>,
    ) -> Result<Self> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(uri) = base_uri {
            builder = builder
                .base_uri(uri)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig { organization, host },
        })
    }

    /// Look up the login the token authenticates as
    pub async fn current_user(token: &str, base_uri: Option<&str>) -> Result<String> {
        let service = Self::with_base_uri(token, String::new(), None, base_uri)?;
        let user = service.client.current().user().await?;
        Ok(user.login)
    }

    fn org(&self) -> &str {
        &self.config.organization
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_repositories(&self, prefix: &str) -> Result<Vec<RemoteRepository>> {
        let first = self
            .client
            .orgs(self.org())
            .list_repos()
            .per_page(PER_PAGE)
            .send()
            .await?;
        let all = self.client.all_pages(first).await?;

        let repos: Vec<RemoteRepository> = all
            .into_iter()
            .filter(|r| r.name.starts_with(prefix))
            .map(repository_from_octocrab)
            .collect();

        debug!("Found {} repositories with prefix {prefix}", repos.len());
        Ok(repos)
    }

    async fn find_repository(&self, name: &str) -> Result<Option<RemoteRepository>> {
        match self.client.repos(self.org(), name).get().await {
            Ok(repo) => Ok(Some(repository_from_octocrab(repo))),
            Err(e) if status_code(&e) == Some(404) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_repository(&self, name: &str, private: bool) -> Result<RemoteRepository> {
        let route = format!("/orgs/{}/repos", self.org());
        let repo: octocrab::models::Repository = self
            .client
            .post(&route, Some(&CreateRepoBody { name, private }))
            .await?;
        Ok(repository_from_octocrab(repo))
    }

    async fn list_pull_requests(&self, repo: &str) -> Result<Vec<PullRequest>> {
        let first = self
            .client
            .pulls(self.org(), repo)
            .list()
            .state(State::All)
            .per_page(PER_PAGE)
            .send()
            .await?;
        let all = self.client.all_pages(first).await?;

        Ok(all.iter().map(pr_from_octocrab).collect())
    }

    async fn create_pr(
        &self,
        repo: &str,
        head: &str,
        base: &str,
        title: &str,
    ) -> Result<PullRequest> {
        let pr = self
            .client
            .pulls(self.org(), repo)
            .create(title, head, base)
            .send()
            .await?;
        Ok(pr_from_octocrab(&pr))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
