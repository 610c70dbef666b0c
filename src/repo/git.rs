//! Git working copy backed by gix (reads) and the git binary (writes)

use crate::error::{Error, Result};
use crate::repo::{BranchLookup, CommitLookup, Repository};
use crate::types::{BranchKind, Commit, GitRemote, LocalBranch, RemoteBranch};
use chrono::{DateTime, FixedOffset};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// All-zero object ID; as an expected old value it means "must not exist"
const NULL_OID: &str = "0000000000000000000000000000000000000000";

/// The marking working copy
///
/// Refs and commits are read through gix. Ref updates, remote registration
/// and transport go through the git binary so that the user's credential
/// helpers and identity settings apply.
pub struct GitWorkspace {
    repo: gix::Repository,
    git_dir: PathBuf,
}

fn git_err(e: impl Display) -> Error {
    Error::Git(e.to_string())
}

impl GitWorkspace {
    /// Open the repository containing `path`
    pub fn open(path: &Path) -> Result<Self> {
        let repo = gix::discover(path).map_err(|e| {
            Error::Git(format!("failed to open git repository at {}: {e}", path.display()))
        })?;
        let git_dir = repo.git_dir().to_path_buf();
        debug!("Opened git repository at {}", git_dir.display());
        Ok(Self { repo, git_dir })
    }

    /// Directory holding the repository's git data
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Re-read configuration after the git binary changed it
    fn reload(&mut self) -> Result<()> {
        self.repo = gix::open(&self.git_dir).map_err(git_err)?;
        Ok(())
    }

    fn run_git(&self, args: &[&str]) -> Result<String> {
        debug!("git {}", args.join(" "));
        // Race detection below matches git's untranslated messages
        let output = Command::new("git")
            .env("LC_ALL", "C")
            .arg("--git-dir")
            .arg(&self.git_dir)
            .args(args)
            .output()
            .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            return Err(Error::Git(format!(
                "git {} failed: {}",
                args.first().copied().unwrap_or_default(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Split `{remote}/{branch}` against the configured remote names
///
/// Only an exact `main`, `master` or `feedback` branch part is accepted, so
/// `alice/feature/main` is not a submission branch of `alice`.
fn split_remote_branch<'a>(short: &str, remotes: &'a [String]) -> Option<(&'a str, BranchKind)> {
    remotes.iter().find_map(|remote| {
        let branch = short.strip_prefix(remote.as_str())?.strip_prefix('/')?;
        BranchKind::parse(branch).map(|kind| (remote.as_str(), kind))
    })
}

impl CommitLookup for GitWorkspace {
    fn commit(&self, id: &str) -> Result<Commit> {
        let oid = gix::ObjectId::from_hex(id.as_bytes()).map_err(git_err)?;
        let commit = self.repo.find_commit(oid).map_err(git_err)?;

        let parents = commit.parent_ids().map(|p| p.to_string()).collect();
        let author = commit.author().map_err(git_err)?;
        let time = author.time().map_err(git_err)?;

        let offset = FixedOffset::east_opt(time.offset)
            .ok_or_else(|| Error::Git(format!("commit {id} has invalid offset {}", time.offset)))?;
        let authored_at = DateTime::from_timestamp(time.seconds, 0)
            .ok_or_else(|| Error::Git(format!("commit {id} has invalid time {}", time.seconds)))?
            .with_timezone(&offset);

        Ok(Commit {
            id: oid.to_string(),
            parents,
            author_name: author.name.to_string(),
            author_email: author.email.to_string(),
            authored_at,
        })
    }
}

impl Repository for GitWorkspace {
    fn local_branches(&self) -> Result<Vec<LocalBranch>> {
        let refs = self.repo.references().map_err(git_err)?;
        let mut branches = Vec::new();

        for reference in refs.local_branches().map_err(git_err)? {
            let mut reference = reference.map_err(git_err)?;
            let name = reference.name().shorten().to_string();
            let id = reference.peel_to_id_in_place().map_err(git_err)?;
            branches.push(LocalBranch {
                name,
                commit_id: id.to_string(),
            });
        }

        Ok(branches)
    }

    fn remote_branches(&self) -> Result<Vec<RemoteBranch>> {
        let remotes: Vec<String> = self
            .repo
            .remote_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        let refs = self.repo.references().map_err(git_err)?;
        let mut branches = Vec::new();

        for reference in refs.remote_branches().map_err(git_err)? {
            let mut reference = reference.map_err(git_err)?;
            let short = reference.name().shorten().to_string();
            let Some((owner, kind)) = split_remote_branch(&short, &remotes) else {
                continue;
            };
            let owner = owner.to_string();
            let id = reference.peel_to_id_in_place().map_err(git_err)?;
            branches.push(RemoteBranch {
                owner,
                kind,
                commit_id: id.to_string(),
            });
        }

        Ok(branches)
    }

    fn lookup_branch(&self, name: &str) -> Result<BranchLookup> {
        let full_name = format!("refs/heads/{name}");
        match self
            .repo
            .try_find_reference(full_name.as_str())
            .map_err(git_err)?
        {
            Some(mut reference) => {
                let id = reference.peel_to_id_in_place().map_err(git_err)?;
                Ok(BranchLookup::Found(id.to_string()))
            }
            None => Ok(BranchLookup::NotFound),
        }
    }

    fn set_branch(&mut self, name: &str, commit_id: &str, expected: &BranchLookup) -> Result<()> {
        let full_name = format!("refs/heads/{name}");
        let old = match expected {
            BranchLookup::NotFound => NULL_OID,
            BranchLookup::Found(id) => id.as_str(),
        };
        let message = format!("classmark: set {name}");

        match self.run_git(&["update-ref", "-m", &message, &full_name, commit_id, old]) {
            Err(Error::Git(msg)) if msg.contains("but expected") || msg.contains("already exists") => {
                Err(Error::BranchMoved(name.to_string()))
            }
            other => other.map(|_| ()),
        }
    }

    fn remotes(&self) -> Result<Vec<GitRemote>> {
        let mut remotes = Vec::new();
        for name in self.repo.remote_names() {
            let remote = self.repo.find_remote(&*name).map_err(git_err)?;
            let url = remote
                .url(gix::remote::Direction::Fetch)
                .map(|u| u.to_bstring().to_string())
                .unwrap_or_default();
            remotes.push(GitRemote {
                name: name.to_string(),
                url,
            });
        }
        Ok(remotes)
    }

    fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        self.run_git(&["remote", "add", name, url])?;
        self.reload()
    }

    fn fetch(&mut self, remote: &str) -> Result<()> {
        self.run_git(&["fetch", "--prune", remote])?;
        Ok(())
    }

    fn push(&mut self, remote: &str, branches: &[String], force: bool) -> Result<()> {
        if branches.is_empty() {
            return Ok(());
        }

        let refspecs: Vec<String> = branches
            .iter()
            .map(|b| format!("refs/heads/{b}:refs/heads/{b}"))
            .collect();

        let mut args = vec!["push"];
        if force {
            args.push("--force");
        }
        args.push(remote);
        args.extend(refspecs.iter().map(String::as_str));

        self.run_git(&args)?;
        Ok(())
    }
}
