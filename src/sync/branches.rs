//! Branch naming and idempotent branch updates

use crate::error::Result;
use crate::repo::{BranchLookup, Repository};
use crate::types::BranchKind;
use tracing::debug;

/// Suffix of deadline-frozen branches
pub const MARK_SUFFIX: &str = "mark";

/// What [`sync_branch`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The branch did not exist and was created
    Created,
    /// The branch existed and was moved
    Updated,
    /// The branch already pointed at the target
    Unchanged,
}

/// Name of a synchronized branch: `{identifier}-{kind}`
pub fn branch_name(identifier: &str, kind: BranchKind) -> String {
    format!("{identifier}-{kind}")
}

/// Name of a deadline-frozen branch: `{identifier}-mark`
pub fn mark_branch_name(identifier: &str) -> String {
    format!("{identifier}-{MARK_SUFFIX}")
}

/// Split a `{identifier}-main` / `{identifier}-master` branch name
pub fn submission_branch(name: &str) -> Option<(&str, BranchKind)> {
    let (identifier, suffix) = name.rsplit_once('-')?;
    let kind = BranchKind::parse(suffix).filter(|k| k.is_submission())?;
    (!identifier.is_empty()).then_some((identifier, kind))
}

/// Identifier of a `{identifier}-mark` branch
pub fn mark_identifier(name: &str) -> Option<&str> {
    name.strip_suffix(MARK_SUFFIX)
        .and_then(|rest| rest.strip_suffix('-'))
        .filter(|identifier| !identifier.is_empty())
}

/// Point branch `name` at `target`, creating it if needed
///
/// Existing branches are moved rather than treated as an error, so calling
/// this repeatedly converges on one branch per name.
pub fn sync_branch<R: Repository + ?Sized>(
    repo: &mut R,
    name: &str,
    target: &str,
) -> Result<SyncOutcome> {
    let current = repo.lookup_branch(name)?;

    let outcome = match &current {
        BranchLookup::Found(id) if id == target => return Ok(SyncOutcome::Unchanged),
        BranchLookup::Found(_) => SyncOutcome::Updated,
        BranchLookup::NotFound => SyncOutcome::Created,
    };

    repo.set_branch(name, target, &current)?;
    debug!(branch = %name, target = %target, ?outcome, "Synced branch");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_names() {
        assert_eq!(branch_name("s1", BranchKind::Main), "s1-main");
        assert_eq!(branch_name("s1", BranchKind::Master), "s1-master");
        assert_eq!(branch_name("s1", BranchKind::Feedback), "s1-feedback");
        assert_eq!(mark_branch_name("s1"), "s1-mark");
    }

    #[test]
    fn test_submission_branch() {
        assert_eq!(submission_branch("s1-main"), Some(("s1", BranchKind::Main)));
        assert_eq!(
            submission_branch("ab-12-master"),
            Some(("ab-12", BranchKind::Master))
        );
        assert_eq!(submission_branch("s1-feedback"), None);
        assert_eq!(submission_branch("s1-mark"), None);
        assert_eq!(submission_branch("main"), None);
        assert_eq!(submission_branch("-main"), None);
    }

    #[test]
    fn test_mark_identifier() {
        assert_eq!(mark_identifier("s1-mark"), Some("s1"));
        assert_eq!(mark_identifier("ab-12-mark"), Some("ab-12"));
        assert_eq!(mark_identifier("s1-main"), None);
        assert_eq!(mark_identifier("bookmark"), None);
        assert_eq!(mark_identifier("-mark"), None);
    }
}
