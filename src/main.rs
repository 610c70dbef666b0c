//! classmark - GitHub Classroom marking workflow
//!
//! CLI binary that collects student submissions into one marking
//! repository, freezes them at the deadline and opens marking PRs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use classmark::config::{CONFIG_FILE, Config};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;

use cli::{AuthAction, CommandContext};

#[derive(Parser)]
#[command(name = "classmark")]
#[command(about = "Marking workflow for GitHub Classroom assignments")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to ./classmark.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the marking git repository (defaults to current directory)
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Stage(StageCommand),

    /// Authentication management
    Auth {
        #[command(subcommand)]
        action: AuthCommand,
    },
}

/// Commands that operate on the marking working copy
#[derive(Subcommand)]
enum StageCommand {
    /// Fetch every student repository of the assignment
    Fetch,

    /// Create {id}-main, {id}-master and {id}-feedback branches
    CreateBranches,

    /// Create {id}-mark branches frozen at each student's deadline
    ImposeDeadline,

    /// Write the submission status report
    CreateReport {
        /// Output file; a .json extension writes JSON, anything else CSV
        #[arg(short, long, default_value = "report.csv")]
        output: PathBuf,
    },

    /// Push all branches to the marking repository
    Push {
        /// Overwrite remote history
        #[arg(long)]
        force: bool,

        /// Skip the force-push confirmation
        #[arg(short, long)]
        yes: bool,

        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },

    /// Open a marking pull request per student
    PullRequests {
        /// Dry run - show what would be done without making changes
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum AuthCommand {
    /// Test authentication
    Test,
    /// Show authentication setup instructions
    Setup,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let repo_path = cli.path.unwrap_or_else(|| PathBuf::from("."));

    let command = match cli.command {
        Commands::Auth { action } => {
            let action = match action {
                AuthCommand::Test => AuthAction::Test,
                AuthCommand::Setup => AuthAction::Setup,
            };
            // Auth works without a config file; one is only read for the host
            let host = if config_path.exists() {
                Config::load(&config_path)?.github.host
            } else {
                None
            };
            cli::run_auth(action, host.as_deref()).await?;
            return Ok(());
        }
        Commands::Stage(command) => command,
    };

    let mut ctx = CommandContext::new(&config_path, &repo_path)?;

    match command {
        StageCommand::Fetch => cli::run_fetch(&mut ctx).await?,
        StageCommand::CreateBranches => cli::run_create_branches(&mut ctx)?,
        StageCommand::ImposeDeadline => cli::run_impose_deadline(&mut ctx)?,
        StageCommand::CreateReport { output } => cli::run_create_report(&ctx, &output)?,
        StageCommand::Push {
            force,
            yes,
            dry_run,
        } => cli::run_push(&mut ctx, force, yes, dry_run).await?,
        StageCommand::PullRequests { dry_run } => cli::run_pull_requests(&ctx, dry_run).await?,
    }

    Ok(())
}
