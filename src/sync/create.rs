//! `create-branches` stage

use crate::error::{Error, Result};
use crate::identity::IdentityResolver;
use crate::repo::Repository;
use crate::sync::branches::{SyncOutcome, branch_name, sync_branch};
use crate::types::SkippedEntity;
use tracing::{info, warn};

/// Result of synchronizing remote-tracking branches into local branches
#[derive(Debug, Clone, Default)]
pub struct BranchSyncResult {
    /// Branches created
    pub created: Vec<String>,
    /// Branches moved to a new commit
    pub updated: Vec<String>,
    /// Branches already up to date
    pub unchanged: Vec<String>,
    /// Remote branches that were not synchronized
    pub skipped: Vec<SkippedEntity>,
}

impl BranchSyncResult {
    fn record(&mut self, name: String, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Created => self.created.push(name),
            SyncOutcome::Updated => self.updated.push(name),
            SyncOutcome::Unchanged => self.unchanged.push(name),
        }
    }
}

/// Mirror every student's `main`, `master` and `feedback` remote-tracking
/// branch as `{identifier}-{kind}`
///
/// Branches on `marking_remote` are ignored. Usernames missing from the
/// roster and branches moved concurrently are skipped with a warning.
pub fn create_branches<R: Repository + ?Sized>(
    repo: &mut R,
    resolver: &IdentityResolver,
    marking_remote: &str,
) -> Result<BranchSyncResult> {
    let mut remote_branches = repo.remote_branches()?;
    remote_branches.retain(|b| b.owner != marking_remote);
    remote_branches.sort_by(|a, b| (&a.owner, a.kind).cmp(&(&b.owner, b.kind)));

    info!("Synchronizing {} remote branches", remote_branches.len());

    let mut result = BranchSyncResult::default();

    for remote in &remote_branches {
        let source = format!("{}/{}", remote.owner, remote.kind);

        let Some(identifier) = resolver.resolve(&remote.owner) else {
            warn!(username = %remote.owner, branch = %source, "username not in roster, skipping");
            result
                .skipped
                .push(SkippedEntity::new(source, "username not in roster"));
            continue;
        };

        let name = branch_name(&identifier, remote.kind);
        match sync_branch(repo, &name, &remote.commit_id) {
            Ok(outcome) => result.record(name, outcome),
            Err(Error::BranchMoved(branch)) => {
                warn!(branch = %branch, "branch changed during sync, skipping");
                result
                    .skipped
                    .push(SkippedEntity::new(branch, "changed concurrently"));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(result)
}
