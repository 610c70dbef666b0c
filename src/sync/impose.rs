//! `impose-deadline` stage

use crate::ancestry::{Cutoff, find_cutoff_commit};
use crate::deadline::effective_deadline;
use crate::error::{Error, Result};
use crate::repo::Repository;
use crate::sync::branches::{SyncOutcome, mark_branch_name, submission_branch, sync_branch};
use crate::types::{BranchKind, LocalBranch, SkippedEntity, Student};
use chrono::{DateTime, FixedOffset, TimeDelta};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

/// A `-mark` branch written by [`impose_deadline`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedBranch {
    /// Student identifier
    pub identifier: String,
    /// The `-mark` branch name
    pub branch: String,
    /// Commit the branch now points at
    pub commit_id: String,
    /// Deadline the student was held to
    pub deadline: DateTime<FixedOffset>,
    /// What happened to the branch
    pub outcome: SyncOutcome,
    /// Every commit was after the deadline, so the root was used
    pub root_after_deadline: bool,
}

/// Result of freezing submissions at their deadlines
#[derive(Debug, Clone, Default)]
pub struct DeadlineResult {
    /// One entry per student with a submission branch
    pub marked: Vec<MarkedBranch>,
    /// Students whose `-mark` branch could not be written
    pub skipped: Vec<SkippedEntity>,
}

/// Write `{identifier}-mark` for every `{identifier}-main` or
/// `{identifier}-master` branch, pointing at the last commit authored at or
/// before the student's effective deadline
///
/// Extra time comes from the roster entry with the same identifier; students
/// not in `students` get none. When both `-main` and `-master` exist, `-main`
/// wins.
pub fn impose_deadline<R: Repository + ?Sized>(
    repo: &mut R,
    students: &[Student],
    cutoff: DateTime<FixedOffset>,
) -> Result<DeadlineResult> {
    let extra_time: HashMap<&str, TimeDelta> = students
        .iter()
        .map(|s| (s.identifier.as_str(), s.extra_time))
        .collect();

    let submissions = submission_heads(repo.local_branches()?);
    info!("Imposing deadline on {} submissions", submissions.len());

    let mut result = DeadlineResult::default();

    for (identifier, branch) in submissions {
        let extension = extra_time
            .get(identifier.as_str())
            .copied()
            .unwrap_or_else(TimeDelta::zero);
        let deadline = effective_deadline(cutoff, extension);

        let head = repo.commit(&branch.commit_id)?;
        let found = find_cutoff_commit(&*repo, head, deadline)?;
        let root_after_deadline = matches!(found, Cutoff::RootAfterDeadline(_));
        if root_after_deadline {
            warn!(
                student = %identifier,
                root = %found.commit().id,
                "every commit is after the deadline, marking the root commit"
            );
        }

        let commit_id = found.into_commit().id;
        let mark = mark_branch_name(&identifier);
        match sync_branch(repo, &mark, &commit_id) {
            Ok(outcome) => result.marked.push(MarkedBranch {
                identifier,
                branch: mark,
                commit_id,
                deadline,
                outcome,
                root_after_deadline,
            }),
            Err(Error::BranchMoved(branch)) => {
                warn!(branch = %branch, "branch changed during update, skipping");
                result
                    .skipped
                    .push(SkippedEntity::new(branch, "changed concurrently"));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(result)
}

/// Pick one submission branch per identifier, preferring `-main`
fn submission_heads(branches: Vec<LocalBranch>) -> BTreeMap<String, LocalBranch> {
    let mut heads: BTreeMap<String, (BranchKind, LocalBranch)> = BTreeMap::new();

    for branch in branches {
        let Some((identifier, kind)) = submission_branch(&branch.name) else {
            continue;
        };
        let identifier = identifier.to_string();

        let existing = heads.get(&identifier).map(|(k, _)| *k);
        if existing.is_some() {
            warn!(student = %identifier, "both main and master branches exist, using main");
        }
        if existing != Some(BranchKind::Main) {
            heads.insert(identifier, (kind, branch));
        }
    }

    heads
        .into_iter()
        .map(|(identifier, (_, branch))| (identifier, branch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(name: &str, commit: &str) -> LocalBranch {
        LocalBranch {
            name: name.to_string(),
            commit_id: commit.to_string(),
        }
    }

    #[test]
    fn test_submission_heads_prefers_main() {
        let heads = submission_heads(vec![
            local("s1-master", "old"),
            local("s1-main", "new"),
            local("s2-main", "b"),
            local("s3-master", "c"),
            local("s3-feedback", "d"),
            local("s4-mark", "e"),
        ]);

        assert_eq!(heads.len(), 3);
        assert_eq!(heads["s1"].commit_id, "new");
        assert_eq!(heads["s2"].commit_id, "b");
        assert_eq!(heads["s3"].name, "s3-master");
    }

    #[test]
    fn test_submission_heads_main_first() {
        let heads = submission_heads(vec![local("s1-main", "new"), local("s1-master", "old")]);
        assert_eq!(heads["s1"].commit_id, "new");
    }
}
