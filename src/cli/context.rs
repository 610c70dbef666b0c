//! Shared command context for CLI commands
//!
//! Extracts the setup shared by every stage: loading configuration and
//! roster, and opening the marking working copy.

use classmark::config::Config;
use classmark::error::Result;
use classmark::identity::IdentityResolver;
use classmark::platform::{PlatformService, create_platform_service};
use classmark::repo::GitWorkspace;
use classmark::roster::load_roster;
use classmark::types::Student;
use std::path::Path;
use tracing::debug;

/// Shared context for stage commands
///
/// Built once per invocation and passed to the command. The platform
/// client is created on demand since only some stages talk to GitHub.
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// The marking working copy
    pub workspace: GitWorkspace,
    /// Roster rows in file order; empty when no roster is configured
    pub students: Vec<Student>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Load configuration
    /// - Load the roster, if one is configured
    /// - Open the git repository at `repo_path`
    pub fn new(config_path: &Path, repo_path: &Path) -> Result<Self> {
        let config = Config::load(config_path)?;

        let students = match (&config.roster, config.roster_path()) {
            (Some(section), Some(path)) => load_roster(&path, section)?,
            _ => Vec::new(),
        };
        debug!("Loaded {} students", students.len());

        let workspace = GitWorkspace::open(repo_path)?;

        Ok(Self {
            config,
            workspace,
            students,
        })
    }

    /// Identity resolver for this run
    pub fn resolver(&self) -> IdentityResolver {
        if self.config.roster.is_some() {
            IdentityResolver::from_roster(&self.students)
        } else {
            IdentityResolver::PassThrough
        }
    }

    /// Authenticate and create the GitHub client
    pub async fn platform(&self) -> Result<Box<dyn PlatformService>> {
        create_platform_service(&self.config.platform_config()?).await
    }
}
