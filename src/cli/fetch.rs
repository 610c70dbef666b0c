//! Fetch command - pull every student repository into the working copy

use crate::cli::CommandContext;
use crate::cli::progress::print_skipped;
use crate::cli::style::{Stylize, check, spinner_style};
use anstream::println;
use classmark::error::Result;
use classmark::fetch::fetch_submissions;
use indicatif::ProgressBar;
use std::time::Duration;

/// Run the fetch command
pub async fn run_fetch(ctx: &mut CommandContext) -> Result<()> {
    let prefix = ctx.config.assignment_prefix()?.to_string();
    let platform = ctx.platform().await?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching {prefix}-* repositories..."));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = fetch_submissions(
        &mut ctx.workspace,
        platform.as_ref(),
        &prefix,
        ctx.config.github.marking_repo.as_deref(),
        ctx.config.marking_remote(),
    )
    .await;
    spinner.finish_and_clear();
    let result = result?;

    println!(
        "{} Fetched {} repositories ({} new remotes)",
        check(),
        result.fetched.len().accent(),
        result.added.len().accent()
    );
    print_skipped(&result.skipped);
    Ok(())
}
