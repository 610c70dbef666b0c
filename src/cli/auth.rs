//! Auth command - test and manage authentication

use crate::cli::style::{Stylize, check};
use anstream::println;
use classmark::auth::{get_github_auth, test_github_auth};
use classmark::error::Result;

/// Auth subcommand action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    /// Verify the token against the API
    Test,
    /// Show setup instructions
    Setup,
}

/// Run the auth test command
async fn run_auth_test(host: Option<&str>) -> Result<()> {
    println!("Testing GitHub authentication...");
    let config = get_github_auth(host).await?;
    let username = test_github_auth(&config, host).await?;
    println!("{} Authenticated as: {}", check(), username.accent());
    println!("Token source: {}", config.source.muted());
    if let Some(host) = host {
        println!("Host: {}", host.muted());
    }
    Ok(())
}

/// Run the auth setup command (show instructions)
fn run_auth_setup() {
    println!("{}", "GitHub Authentication Setup".emphasis());
    println!();
    println!("Option 1: GitHub CLI (recommended)");
    println!("  Install: https://cli.github.com/");
    println!("  Run: gh auth login");
    println!();
    println!("Option 2: Environment variable");
    println!("  Set GITHUB_TOKEN or GH_TOKEN");
    println!();
    println!("The token needs the `repo` scope and permission to create");
    println!("repositories in the course organization.");
    println!();
    println!("For GitHub Enterprise:");
    println!("  Set `host` in the [github] section of classmark.toml");
}

/// Wrapper for auth commands
pub async fn run_auth(action: AuthAction, host: Option<&str>) -> Result<()> {
    match action {
        AuthAction::Test => run_auth_test(host).await,
        AuthAction::Setup => {
            run_auth_setup();
            Ok(())
        }
    }
}
