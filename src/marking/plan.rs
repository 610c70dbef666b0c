//! Marking remote resolution and pull-request planning

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::repo::Repository;
use crate::sync::{branch_name, mark_identifier};
use crate::types::{BranchKind, SkippedEntity};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// The marking repository as registered in the local working copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkingRemote {
    /// Local remote name
    pub name: String,
    /// Repository name on the platform
    pub repository: String,
    /// URL the remote points at
    pub url: String,
    /// Whether the platform repository was created in this run
    pub created_repository: bool,
    /// Whether the local remote was registered in this run
    pub added_remote: bool,
}

/// Locate the marking remote, creating the private platform repository and
/// registering the remote when needed
///
/// Failure to create the repository is fatal.
pub async fn resolve_marking_remote<R: Repository + ?Sized>(
    repo: &mut R,
    platform: &dyn PlatformService,
    repository: &str,
    remote_name: &str,
) -> Result<MarkingRemote> {
    if let Some(remote) = repo.find_remote(remote_name)? {
        debug!("Marking remote {remote_name} already configured: {}", remote.url);
        return Ok(MarkingRemote {
            name: remote.name,
            repository: repository.to_string(),
            url: remote.url,
            created_repository: false,
            added_remote: false,
        });
    }

    let (found, created_repository) = match platform.find_repository(repository).await? {
        Some(found) => (found, false),
        None => {
            info!("Creating private repository {repository}");
            let created = platform
                .create_repository(repository, true)
                .await
                .map_err(|e| Error::RepositoryCreation(format!("{repository}: {e}")))?;
            (created, true)
        }
    };

    repo.add_remote(remote_name, &found.clone_url)?;

    Ok(MarkingRemote {
        name: remote_name.to_string(),
        repository: found.name,
        url: found.clone_url,
        created_repository,
        added_remote: true,
    })
}

/// A PR that needs to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrToCreate {
    /// Student identifier
    pub identifier: String,
    /// `{identifier}-mark`
    pub head: String,
    /// `{identifier}-feedback`
    pub base: String,
    /// PR title
    pub title: String,
}

/// Pull-request plan
#[derive(Debug, Clone, Default)]
pub struct PullRequestPlan {
    /// Marking repository the PRs are opened on
    pub repository: String,
    /// PRs to create, ordered by head branch
    pub prs_to_create: Vec<PrToCreate>,
    /// Mark branches that need no PR
    pub skipped: Vec<SkippedEntity>,
}

impl PullRequestPlan {
    /// Whether there is nothing to create
    pub fn is_empty(&self) -> bool {
        self.prs_to_create.is_empty()
    }
}

/// Plan one PR per `{id}-mark` branch, based on `{id}-feedback`
///
/// Heads that already have a PR (open or closed) are skipped, as are mark
/// branches without a local feedback branch. Fails fast when the marking
/// remote has not been configured.
pub async fn create_pull_request_plan<R: Repository + ?Sized>(
    repo: &R,
    platform: &dyn PlatformService,
    repository: &str,
    remote_name: &str,
    title: &str,
) -> Result<PullRequestPlan> {
    if repo.find_remote(remote_name)?.is_none() {
        return Err(Error::MarkingRemoteNotConfigured(remote_name.to_string()));
    }

    let existing_heads: HashSet<String> = platform
        .list_pull_requests(repository)
        .await?
        .into_iter()
        .map(|pr| pr.head_ref)
        .collect();

    let mut branches: Vec<String> = repo.local_branches()?.into_iter().map(|b| b.name).collect();
    branches.sort();
    let local: HashSet<&str> = branches.iter().map(String::as_str).collect();

    let mut plan = PullRequestPlan {
        repository: repository.to_string(),
        ..PullRequestPlan::default()
    };

    for head in &branches {
        let Some(identifier) = mark_identifier(head) else {
            continue;
        };

        if existing_heads.contains(head) {
            debug!("PR for {head} already exists");
            plan.skipped
                .push(SkippedEntity::new(head, "pull request already exists"));
            continue;
        }

        let base = branch_name(identifier, BranchKind::Feedback);
        if !local.contains(base.as_str()) {
            warn!(student = %identifier, "no {base} branch, skipping pull request");
            plan.skipped
                .push(SkippedEntity::new(head, format!("no {base} branch")));
            continue;
        }

        plan.prs_to_create.push(PrToCreate {
            identifier: identifier.to_string(),
            head: head.clone(),
            base,
            title: title.to_string(),
        });
    }

    info!(
        "Planned {} pull requests, {} skipped",
        plan.prs_to_create.len(),
        plan.skipped.len()
    );
    Ok(plan)
}
