//! First-parent ancestry walk
//!
//! Submission histories are treated as linear: only the first parent of each
//! commit is followed, so commits brought in by merges are never candidates.

use crate::error::{Error, Result};
use crate::repo::CommitLookup;
use crate::types::Commit;
use chrono::{DateTime, FixedOffset};

/// Lazy first-parent walk from a head commit back to the root
///
/// Yields the head first. Each parent is loaded only when requested, and a
/// failed lookup ends the walk after yielding the error.
pub struct Ancestors<'a, L: CommitLookup + ?Sized> {
    lookup: &'a L,
    next: Next,
}

enum Next {
    Loaded(Commit),
    Pending(String),
    Done,
}

impl<'a, L: CommitLookup + ?Sized> Ancestors<'a, L> {
    /// Start a walk at `head`
    pub const fn new(lookup: &'a L, head: Commit) -> Self {
        Self {
            lookup,
            next: Next::Loaded(head),
        }
    }
}

impl<L: CommitLookup + ?Sized> Iterator for Ancestors<'_, L> {
    type Item = Result<Commit>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit = match std::mem::replace(&mut self.next, Next::Done) {
            Next::Loaded(commit) => commit,
            Next::Pending(id) => match self.lookup.commit(&id) {
                Ok(commit) => commit,
                Err(e) => return Some(Err(e)),
            },
            Next::Done => return None,
        };

        if let Some(parent) = commit.first_parent() {
            self.next = Next::Pending(parent.to_string());
        }
        Some(Ok(commit))
    }
}

/// Outcome of searching for the last commit at or before a deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cutoff {
    /// Latest commit authored at or before the deadline
    Found(Commit),
    /// Every commit is after the deadline; this is the root
    RootAfterDeadline(Commit),
}

impl Cutoff {
    /// The selected commit
    pub const fn commit(&self) -> &Commit {
        match self {
            Self::Found(commit) | Self::RootAfterDeadline(commit) => commit,
        }
    }

    /// Consume into the selected commit
    pub fn into_commit(self) -> Commit {
        match self {
            Self::Found(commit) | Self::RootAfterDeadline(commit) => commit,
        }
    }
}

/// Find the latest first-parent ancestor of `head` authored at or before
/// `deadline`, falling back to the root commit when there is none
pub fn find_cutoff_commit<L: CommitLookup + ?Sized>(
    lookup: &L,
    head: Commit,
    deadline: DateTime<FixedOffset>,
) -> Result<Cutoff> {
    let mut oldest = None;

    for commit in Ancestors::new(lookup, head) {
        let commit = commit?;
        if commit.authored_at <= deadline {
            return Ok(Cutoff::Found(commit));
        }
        oldest = Some(commit);
    }

    oldest
        .map(Cutoff::RootAfterDeadline)
        .ok_or_else(|| Error::Internal("ancestry walk yielded no commits".to_string()))
}
