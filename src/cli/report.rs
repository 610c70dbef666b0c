//! Report command - write the submission status report

use crate::cli::CommandContext;
use crate::cli::style::{Stylize, check};
use anstream::println;
use classmark::error::{Error, Result};
use classmark::report::{build_report, write_report};
use std::path::Path;

/// Run the create-report command
pub fn run_create_report(ctx: &CommandContext, output: &Path) -> Result<()> {
    if ctx.config.roster.is_none() {
        return Err(Error::Config(
            "create-report needs a [roster] section".to_string(),
        ));
    }

    let cutoff = ctx.config.deadline()?;
    let records = build_report(
        &ctx.workspace,
        &ctx.students,
        cutoff,
        &ctx.config.report.scaffold_author,
    )?;
    write_report(output, &records)?;

    let submitted = records.iter().filter(|r| r.submitted).count();
    let late = records.iter().filter(|r| r.late == Some(true)).count();
    println!(
        "{} Wrote {} ({} students, {} submitted, {} late)",
        check(),
        output.display().accent(),
        records.len().accent(),
        submitted.accent(),
        late.warn().for_stdout()
    );
    Ok(())
}
