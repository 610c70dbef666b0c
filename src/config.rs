//! Configuration file loading
//!
//! Configuration lives in `classmark.toml`. Sections are optional at load
//! time; each stage asks for the keys it needs and gets a configuration
//! error naming the missing key.

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration filename
pub const CONFIG_FILE: &str = "classmark.toml";

/// Author used by GitHub Classroom for template-initialization commits
pub const DEFAULT_SCAFFOLD_AUTHOR: &str = "github-classroom[bot]";

const DEFAULT_MARKING_REMOTE: &str = "marking";
const DEFAULT_PR_DELAY_SECS: u64 = 10;
const DEFAULT_PR_TITLE: &str = "Marking";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// `[github]` section
    #[serde(default)]
    pub github: GitHubSection,
    /// `[roster]` section; absent means usernames are used as identifiers
    pub roster: Option<RosterSection>,
    /// `[deadline]` section
    pub deadline: Option<DeadlineSection>,
    /// `[pull_requests]` section
    #[serde(default)]
    pub pull_requests: PullRequestSection,
    /// `[report]` section
    #[serde(default)]
    pub report: ReportSection,
    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// `[github]` section
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubSection {
    /// Organization owning the assignment repositories
    pub organization: Option<String>,
    /// Student repositories are named `{assignment_prefix}-{username}`
    pub assignment_prefix: Option<String>,
    /// Repository that receives marking branches and pull requests
    pub marking_repo: Option<String>,
    /// Local remote name for the marking repository
    #[serde(default = "default_marking_remote")]
    pub marking_remote: String,
    /// GitHub Enterprise host
    pub host: Option<String>,
}

impl Default for GitHubSection {
    fn default() -> Self {
        Self {
            organization: None,
            assignment_prefix: None,
            marking_repo: None,
            marking_remote: default_marking_remote(),
            host: None,
        }
    }
}

/// `[roster]` section
#[derive(Debug, Clone, Deserialize)]
pub struct RosterSection {
    /// Path to the roster CSV
    pub path: PathBuf,
    /// Column holding the institutional identifier
    #[serde(default = "default_id_column")]
    pub id_column: String,
    /// Column holding the GitHub username
    #[serde(default = "default_username_column")]
    pub username_column: String,
    /// Column holding extra time in minutes (may be absent from the file)
    #[serde(default = "default_extra_time_column")]
    pub extra_time_column: String,
}

/// `[deadline]` section
#[derive(Debug, Clone, Deserialize)]
pub struct DeadlineSection {
    /// Base cutoff, RFC 3339 with an explicit offset
    pub cutoff: String,
}

/// `[pull_requests]` section
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestSection {
    /// Pause after each pull request creation, in seconds
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,
    /// Title given to every marking pull request
    #[serde(default = "default_pr_title")]
    pub title: String,
}

impl Default for PullRequestSection {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
            title: default_pr_title(),
        }
    }
}

/// `[report]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ReportSection {
    /// Author name or email marking template-initialization commits
    #[serde(default = "default_scaffold_author")]
    pub scaffold_author: String,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            scaffold_author: default_scaffold_author(),
        }
    }
}

fn default_marking_remote() -> String {
    DEFAULT_MARKING_REMOTE.to_string()
}

fn default_id_column() -> String {
    "identifier".to_string()
}

fn default_username_column() -> String {
    "github_username".to_string()
}

fn default_extra_time_column() -> String {
    "extra_time".to_string()
}

const fn default_delay_secs() -> u64 {
    DEFAULT_PR_DELAY_SECS
}

fn default_pr_title() -> String {
    DEFAULT_PR_TITLE.to_string()
}

fn default_scaffold_author() -> String {
    DEFAULT_SCAFFOLD_AUTHOR.to_string()
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "configuration file {} not found",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

        let mut config = Self::parse(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::Config(format!("invalid TOML: {e}")))?;

        // Surface a malformed deadline at load time rather than mid-stage
        if config.deadline.is_some() {
            config.deadline()?;
        }

        Ok(config)
    }

    /// Organization owning the repositories
    pub fn organization(&self) -> Result<&str> {
        self.github
            .organization
            .as_deref()
            .ok_or_else(|| missing("github.organization"))
    }

    /// Prefix of student repository names
    pub fn assignment_prefix(&self) -> Result<&str> {
        self.github
            .assignment_prefix
            .as_deref()
            .ok_or_else(|| missing("github.assignment_prefix"))
    }

    /// Name of the marking repository
    pub fn marking_repo(&self) -> Result<&str> {
        self.github
            .marking_repo
            .as_deref()
            .ok_or_else(|| missing("github.marking_repo"))
    }

    /// Local remote name for the marking repository
    pub fn marking_remote(&self) -> &str {
        &self.github.marking_remote
    }

    /// Base cutoff timestamp
    pub fn deadline(&self) -> Result<DateTime<FixedOffset>> {
        let section = self.deadline.as_ref().ok_or_else(|| missing("deadline.cutoff"))?;
        DateTime::parse_from_rfc3339(section.cutoff.trim()).map_err(|e| {
            Error::Config(format!(
                "deadline.cutoff '{}' is not an RFC 3339 timestamp with offset: {e}",
                section.cutoff
            ))
        })
    }

    /// Roster path resolved against the config file's directory
    pub fn roster_path(&self) -> Option<PathBuf> {
        self.roster.as_ref().map(|r| {
            if r.path.is_absolute() {
                r.path.clone()
            } else {
                self.base_dir.join(&r.path)
            }
        })
    }

    /// Platform settings for the GitHub client
    pub fn platform_config(&self) -> Result<PlatformConfig> {
        Ok(PlatformConfig {
            organization: self.organization()?.to_string(),
            host: self.github.host.clone(),
        })
    }

    /// Pause between pull request creations
    pub const fn pr_delay(&self) -> Duration {
        Duration::from_secs(self.pull_requests.delay_secs)
    }
}

fn missing(key: &str) -> Error {
    Error::Config(format!("missing key `{key}`"))
}
