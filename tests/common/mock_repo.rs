//! In-memory repository for testing the stages without git

#![allow(dead_code)]

use classmark::error::{Error, Result};
use classmark::repo::{BranchLookup, CommitLookup, Repository};
use classmark::types::{BranchKind, Commit, GitRemote, LocalBranch, RemoteBranch};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Call record for `push`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushCall {
    pub remote: String,
    pub branches: Vec<String>,
    pub force: bool,
}

/// In-memory `Repository`
///
/// Branch writes are compare-and-swap like git's `update-ref`. A branch
/// listed with [`MockRepository::move_before_write`] is moved by a
/// simulated concurrent writer between lookup and write.
#[derive(Debug, Default)]
pub struct MockRepository {
    pub commits: HashMap<String, Commit>,
    pub branches: BTreeMap<String, String>,
    pub remote_branches: Vec<RemoteBranch>,
    pub remotes: Vec<GitRemote>,
    /// What fetching a remote brings in: remote name -> (kind, commit)
    pub remote_contents: HashMap<String, Vec<(BranchKind, String)>>,
    pub fetch_calls: Vec<String>,
    pub push_calls: Vec<PushCall>,
    pub set_branch_calls: Vec<(String, String)>,
    failing_fetches: HashSet<String>,
    racing_branches: HashMap<String, String>,
}

impl MockRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Store commits
    pub fn with_commits(mut self, commits: impl IntoIterator<Item = Commit>) -> Self {
        for commit in commits {
            self.commits.insert(commit.id.clone(), commit);
        }
        self
    }

    /// Point a local branch at a commit
    pub fn with_branch(mut self, name: &str, commit_id: &str) -> Self {
        self.branches.insert(name.to_string(), commit_id.to_string());
        self
    }

    /// Add a remote-tracking branch
    pub fn with_remote_branch(mut self, owner: &str, kind: BranchKind, commit_id: &str) -> Self {
        self.remote_branches.push(RemoteBranch {
            owner: owner.to_string(),
            kind,
            commit_id: commit_id.to_string(),
        });
        self
    }

    /// Register a remote
    pub fn with_remote(mut self, name: &str, url: &str) -> Self {
        self.remotes.push(GitRemote {
            name: name.to_string(),
            url: url.to_string(),
        });
        self
    }

    /// Make `fetch` of a remote fail
    pub fn fail_fetch(&mut self, remote: &str) {
        self.failing_fetches.insert(remote.to_string());
    }

    /// Move `name` to `commit_id` right before the next write to it
    pub fn move_before_write(&mut self, name: &str, commit_id: &str) {
        self.racing_branches
            .insert(name.to_string(), commit_id.to_string());
    }

    /// Target of a local branch
    pub fn branch(&self, name: &str) -> Option<&str> {
        self.branches.get(name).map(String::as_str)
    }
}

impl CommitLookup for MockRepository {
    fn commit(&self, id: &str) -> Result<Commit> {
        self.commits.commit(id)
    }
}

impl Repository for MockRepository {
    fn local_branches(&self) -> Result<Vec<LocalBranch>> {
        Ok(self
            .branches
            .iter()
            .map(|(name, commit_id)| LocalBranch {
                name: name.clone(),
                commit_id: commit_id.clone(),
            })
            .collect())
    }

    fn remote_branches(&self) -> Result<Vec<RemoteBranch>> {
        Ok(self.remote_branches.clone())
    }

    fn lookup_branch(&self, name: &str) -> Result<BranchLookup> {
        Ok(self
            .branches
            .get(name)
            .map_or(BranchLookup::NotFound, |id| BranchLookup::Found(id.clone())))
    }

    fn set_branch(&mut self, name: &str, commit_id: &str, expected: &BranchLookup) -> Result<()> {
        if let Some(moved_to) = self.racing_branches.remove(name) {
            self.branches.insert(name.to_string(), moved_to);
        }

        let current = self.lookup_branch(name)?;
        if &current != expected {
            return Err(Error::BranchMoved(name.to_string()));
        }

        self.set_branch_calls
            .push((name.to_string(), commit_id.to_string()));
        self.branches
            .insert(name.to_string(), commit_id.to_string());
        Ok(())
    }

    fn remotes(&self) -> Result<Vec<GitRemote>> {
        Ok(self.remotes.clone())
    }

    fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        if self.remotes.iter().any(|r| r.name == name) {
            return Err(Error::Git(format!("remote {name} already exists")));
        }
        self.remotes.push(GitRemote {
            name: name.to_string(),
            url: url.to_string(),
        });
        Ok(())
    }

    fn fetch(&mut self, remote: &str) -> Result<()> {
        self.fetch_calls.push(remote.to_string());
        if self.failing_fetches.contains(remote) {
            return Err(Error::Git(format!("could not read from remote {remote}")));
        }

        self.remote_branches.retain(|b| b.owner != remote);
        for (kind, commit_id) in self.remote_contents.get(remote).into_iter().flatten() {
            self.remote_branches.push(RemoteBranch {
                owner: remote.to_string(),
                kind: *kind,
                commit_id: commit_id.clone(),
            });
        }
        Ok(())
    }

    fn push(&mut self, remote: &str, branches: &[String], force: bool) -> Result<()> {
        if !self.remotes.iter().any(|r| r.name == remote) {
            return Err(Error::Git(format!("no such remote {remote}")));
        }
        self.push_calls.push(PushCall {
            remote: remote.to_string(),
            branches: branches.to_vec(),
            force,
        });
        Ok(())
    }
}
