//! Branch commands - `create-branches` and `impose-deadline`

use crate::cli::CommandContext;
use crate::cli::progress::print_skipped;
use crate::cli::style::{Stylize, check};
use anstream::println;
use classmark::error::Result;
use classmark::sync::{SyncOutcome, create_branches, impose_deadline};

/// Run the create-branches command
pub fn run_create_branches(ctx: &mut CommandContext) -> Result<()> {
    let resolver = ctx.resolver();
    let result = create_branches(&mut ctx.workspace, &resolver, ctx.config.marking_remote())?;

    println!(
        "{} {} created, {} updated, {} unchanged",
        check(),
        result.created.len().accent(),
        result.updated.len().accent(),
        result.unchanged.len().muted()
    );
    print_skipped(&result.skipped);
    Ok(())
}

/// Run the impose-deadline command
pub fn run_impose_deadline(ctx: &mut CommandContext) -> Result<()> {
    let cutoff = ctx.config.deadline()?;
    let result = impose_deadline(&mut ctx.workspace, &ctx.students, cutoff)?;

    let count = |outcome: SyncOutcome| {
        result
            .marked
            .iter()
            .filter(|m| m.outcome == outcome)
            .count()
    };

    println!(
        "{} {} mark branches created, {} updated, {} unchanged",
        check(),
        count(SyncOutcome::Created).accent(),
        count(SyncOutcome::Updated).accent(),
        count(SyncOutcome::Unchanged).muted()
    );

    for marked in result.marked.iter().filter(|m| m.root_after_deadline) {
        println!(
            "  {} {} has no commit before {}; marked the root commit",
            "!".warn().for_stdout(),
            marked.identifier.accent(),
            marked.deadline.to_rfc3339().muted()
        );
    }
    print_skipped(&result.skipped);
    Ok(())
}
