//! Push and pull-request execution

use crate::error::{Error, Result};
use crate::marking::{Phase, ProgressCallback, PullRequestPlan, PushStatus};
use crate::platform::PlatformService;
use crate::repo::Repository;
use crate::types::{PullRequest, SkippedEntity};
use std::time::Duration;
use tracing::{debug, info};

/// Result of pushing to the marking remote
#[derive(Debug, Clone, Default)]
pub struct PushResult {
    /// Remote pushed to
    pub remote: String,
    /// Branches pushed (or that would be pushed in a dry run)
    pub branches: Vec<String>,
    /// Whether the push was forced
    pub forced: bool,
}

/// Push every local branch to `remote` under the same name
///
/// `force` overwrites remote history and must be requested explicitly.
pub async fn push_branches<R: Repository + ?Sized>(
    repo: &mut R,
    remote: &str,
    force: bool,
    progress: &dyn ProgressCallback,
    dry_run: bool,
) -> Result<PushResult> {
    let mut branches: Vec<String> = repo.local_branches()?.into_iter().map(|b| b.name).collect();
    branches.sort();

    let result = PushResult {
        remote: remote.to_string(),
        branches,
        forced: force,
    };

    if dry_run {
        progress.on_message("Dry run - no changes will be made").await;
        let verb = if force { "force push" } else { "push" };
        progress
            .on_message(&format!(
                "Would {verb} {} branches to {remote}",
                result.branches.len()
            ))
            .await;
        return Ok(result);
    }

    if result.branches.is_empty() {
        progress.on_message("No local branches to push").await;
        return Ok(result);
    }

    progress.on_phase(Phase::Pushing).await;
    progress
        .on_push(remote, result.branches.len(), PushStatus::Started)
        .await;

    match repo.push(remote, &result.branches, force) {
        Ok(()) => {
            progress
                .on_push(remote, result.branches.len(), PushStatus::Success)
                .await;
        }
        Err(e) => {
            progress
                .on_push(remote, result.branches.len(), PushStatus::Failed(e.to_string()))
                .await;
            return Err(e);
        }
    }

    info!("Pushed {} branches to {remote}", result.branches.len());
    progress.on_phase(Phase::Complete).await;
    Ok(result)
}

/// Result of pull-request creation
#[derive(Debug, Clone, Default)]
pub struct PullRequestResult {
    /// PRs created
    pub created: Vec<PullRequest>,
    /// Planned PRs the platform reported as already existing
    pub skipped: Vec<SkippedEntity>,
}

/// Create the planned PRs one at a time
///
/// Waits `delay` between consecutive creation requests, including after one
/// the platform answered with "already exists". A PR the platform reports as
/// already existing is skipped; any other platform error aborts the stage.
pub async fn execute_pull_requests(
    plan: &PullRequestPlan,
    platform: &dyn PlatformService,
    progress: &dyn ProgressCallback,
    delay: Duration,
    dry_run: bool,
) -> Result<PullRequestResult> {
    let mut result = PullRequestResult::default();

    if dry_run {
        progress.on_message("Dry run - no changes will be made").await;
        report_dry_run(plan, progress).await;
        return Ok(result);
    }

    progress.on_phase(Phase::CreatingPrs).await;

    for (idx, pr) in plan.prs_to_create.iter().enumerate() {
        if idx > 0 {
            debug!("Waiting {delay:?} before the next pull request");
            tokio::time::sleep(delay).await;
        }

        progress
            .on_message(&format!("Creating PR {} -> {}", pr.head, pr.base))
            .await;

        match platform
            .create_pr(&plan.repository, &pr.head, &pr.base, &pr.title)
            .await
        {
            Ok(created) => {
                progress.on_pr_created(&pr.head, &created).await;
                result.created.push(created);
            }
            Err(Error::AlreadyExists(reason)) => {
                progress.on_pr_skipped(&pr.head, &reason).await;
                result.skipped.push(SkippedEntity::new(&pr.head, reason));
            }
            Err(e) => {
                progress.on_error(&e).await;
                return Err(e);
            }
        }
    }

    progress.on_phase(Phase::Complete).await;
    Ok(result)
}

/// Report what would be done in a dry run
async fn report_dry_run(plan: &PullRequestPlan, progress: &dyn ProgressCallback) {
    if plan.is_empty() {
        progress.on_message("Nothing to do - all PRs exist").await;
        return;
    }

    progress.on_message("Would create PRs:").await;
    for pr in &plan.prs_to_create {
        progress
            .on_message(&format!("  - {} -> {} ({})", pr.head, pr.base, pr.title))
            .await;
    }
}
