//! Local repository access
//!
//! The engine only sees branches, commits and remotes through the
//! [`Repository`] trait. [`GitWorkspace`] is the git-backed implementation.

mod git;

pub use git::GitWorkspace;

use crate::error::{Error, Result};
use crate::types::{Commit, GitRemote, LocalBranch, RemoteBranch};
use std::collections::HashMap;

/// Result of looking a branch up before deciding to create or move it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchLookup {
    /// No branch with this name
    NotFound,
    /// Branch exists and points at this commit
    Found(String),
}

/// Commit access used by the ancestry walk
pub trait CommitLookup {
    /// Load a commit by ID
    fn commit(&self, id: &str) -> Result<Commit>;
}

impl CommitLookup for HashMap<String, Commit> {
    fn commit(&self, id: &str) -> Result<Commit> {
        self.get(id)
            .cloned()
            .ok_or_else(|| Error::Git(format!("commit {id} not found")))
    }
}

/// Branch, remote and transport operations on the marking working copy
pub trait Repository: CommitLookup {
    /// All local branches
    fn local_branches(&self) -> Result<Vec<LocalBranch>>;

    /// Remote-tracking branches of a synchronized kind, across all remotes
    fn remote_branches(&self) -> Result<Vec<RemoteBranch>>;

    /// Look a local branch up by name
    fn lookup_branch(&self, name: &str) -> Result<BranchLookup>;

    /// Point `name` at `commit_id`, provided it is still in state `expected`
    ///
    /// Fails with [`Error::BranchMoved`] when the branch changed since it
    /// was looked up.
    fn set_branch(&mut self, name: &str, commit_id: &str, expected: &BranchLookup) -> Result<()>;

    /// Configured remotes
    fn remotes(&self) -> Result<Vec<GitRemote>>;

    /// Register a new remote
    fn add_remote(&mut self, name: &str, url: &str) -> Result<()>;

    /// Fetch all branches of a remote
    fn fetch(&mut self, remote: &str) -> Result<()>;

    /// Push local branches to a remote under the same names
    fn push(&mut self, remote: &str, branches: &[String], force: bool) -> Result<()>;

    /// Find a configured remote by name
    fn find_remote(&self, name: &str) -> Result<Option<GitRemote>> {
        Ok(self.remotes()?.into_iter().find(|r| r.name == name))
    }
}
