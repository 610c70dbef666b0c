//! Pull-requests command - open `{id}-mark` into `{id}-feedback` PRs

use crate::cli::CommandContext;
use crate::cli::progress::{CliProgress, print_skipped};
use crate::cli::style::{Stylize, check};
use anstream::println;
use classmark::error::Result;
use classmark::marking::{
    Phase, ProgressCallback, create_pull_request_plan, execute_pull_requests,
};

/// Run the pull-requests command
pub async fn run_pull_requests(ctx: &CommandContext, dry_run: bool) -> Result<()> {
    let repository = ctx.config.marking_repo()?;
    let platform = ctx.platform().await?;
    let progress = CliProgress;

    progress.on_phase(Phase::Planning).await;
    let plan = create_pull_request_plan(
        &ctx.workspace,
        platform.as_ref(),
        repository,
        ctx.config.marking_remote(),
        &ctx.config.pull_requests.title,
    )
    .await?;
    print_skipped(&plan.skipped);

    if plan.is_empty() && !dry_run {
        println!("Nothing to do - all pull requests exist");
        return Ok(());
    }

    let result = execute_pull_requests(
        &plan,
        platform.as_ref(),
        &progress,
        ctx.config.pr_delay(),
        dry_run,
    )
    .await?;

    println!();
    if dry_run {
        println!("Dry run complete");
    } else {
        println!(
            "{} {} pull requests created on {}",
            check(),
            result.created.len().accent(),
            repository.accent()
        );
        print_skipped(&result.skipped);
    }
    Ok(())
}
