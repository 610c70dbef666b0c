//! `fetch` stage
//!
//! Discovers student repositories named `{prefix}-{username}` in the
//! organization and fetches each one into a remote named after the student.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::repo::Repository;
use crate::types::SkippedEntity;
use tracing::{debug, info, warn};

/// Result of the fetch stage
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// Remotes registered during this run
    pub added: Vec<String>,
    /// Remotes fetched successfully
    pub fetched: Vec<String>,
    /// Repositories that could not be fetched
    pub skipped: Vec<SkippedEntity>,
}

/// Student username encoded in a repository name, if it is a student repository
pub fn student_username<'a>(repository: &'a str, prefix: &str) -> Option<&'a str> {
    repository
        .strip_prefix(prefix)?
        .strip_prefix('-')
        .filter(|username| !username.is_empty())
}

/// Fetch every student repository of the assignment
///
/// The marking repository and the marking remote are never treated as
/// student repositories. A failed fetch skips that student; a failed
/// repository listing aborts the stage.
pub async fn fetch_submissions<R: Repository + ?Sized>(
    repo: &mut R,
    platform: &dyn PlatformService,
    prefix: &str,
    marking_repo: Option<&str>,
    marking_remote: &str,
) -> Result<FetchResult> {
    let mut repositories = platform.list_repositories(prefix).await?;
    repositories.sort_by(|a, b| a.name.cmp(&b.name));

    let existing: Vec<String> = repo.remotes()?.into_iter().map(|r| r.name).collect();
    let mut result = FetchResult::default();

    for repository in &repositories {
        if marking_repo == Some(repository.name.as_str()) {
            debug!("Ignoring marking repository {}", repository.name);
            continue;
        }

        let Some(username) = student_username(&repository.name, prefix) else {
            debug!("Ignoring {}: not named {prefix}-<username>", repository.name);
            continue;
        };

        if username == marking_remote {
            warn!(repository = %repository.name, "username clashes with the marking remote, skipping");
            result.skipped.push(SkippedEntity::new(
                &repository.name,
                "username clashes with the marking remote",
            ));
            continue;
        }

        if !existing.iter().any(|name| name == username) {
            if let Err(e) = repo.add_remote(username, &repository.clone_url) {
                warn!(repository = %repository.name, "failed to add remote: {e}");
                result.skipped.push(SkippedEntity::new(&repository.name, e.to_string()));
                continue;
            }
            result.added.push(username.to_string());
        }

        match repo.fetch(username) {
            Ok(()) => result.fetched.push(username.to_string()),
            Err(e) => {
                warn!(repository = %repository.name, "fetch failed: {e}");
                result.skipped.push(SkippedEntity::new(&repository.name, e.to_string()));
            }
        }
    }

    info!(
        "Fetched {} of {} student repositories",
        result.fetched.len(),
        result.fetched.len() + result.skipped.len()
    );
    Ok(result)
}
