//! Push command - send every local branch to the marking repository

use crate::cli::CommandContext;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, check};
use anstream::println;
use classmark::error::{Error, Result};
use classmark::marking::{Phase, ProgressCallback, push_branches, resolve_marking_remote};
use classmark::repo::Repository;
use dialoguer::Confirm;

/// Run the push command
///
/// Creates the marking repository and its remote on first use. A forced
/// push asks for confirmation unless `yes` is set.
pub async fn run_push(ctx: &mut CommandContext, force: bool, yes: bool, dry_run: bool) -> Result<()> {
    let repository = ctx.config.marking_repo()?.to_string();
    let remote_name = ctx.config.marking_remote().to_string();
    let progress = CliProgress;

    if force && !yes && !dry_run {
        let prompt = format!("Force push overwrites branch history on {remote_name}. Proceed?");
        if !Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))?
        {
            println!("{}", "Aborted".muted());
            return Ok(());
        }
    }

    if dry_run && ctx.workspace.find_remote(&remote_name)?.is_none() {
        println!(
            "Would create repository {} and add remote {}",
            repository.accent(),
            remote_name.accent()
        );
    } else if !dry_run {
        progress.on_phase(Phase::ResolvingRemote).await;
        let platform = ctx.platform().await?;
        let remote = resolve_marking_remote(
            &mut ctx.workspace,
            platform.as_ref(),
            &repository,
            &remote_name,
        )
        .await?;

        if remote.created_repository {
            println!("  {} Created private repository {}", check(), remote.repository.accent());
        }
        if remote.added_remote {
            println!("  {} Added remote {} ({})", check(), remote.name.accent(), remote.url.muted());
        }
    }

    let result = push_branches(&mut ctx.workspace, &remote_name, force, &progress, dry_run).await?;

    if dry_run {
        println!();
        println!("Dry run complete");
    } else {
        println!(
            "{} Push complete: {} branches on {}",
            check(),
            result.branches.len().accent(),
            result.remote.accent()
        );
    }
    Ok(())
}
