//! Shared CLI progress callback and summary output

use crate::cli::style::{Stream, Stylize, arrow, bullet, check, cross, hyperlink_url};
use anstream::{eprintln, println};
use async_trait::async_trait;
use classmark::error::Error;
use classmark::marking::{Phase, ProgressCallback, PushStatus};
use classmark::types::{PullRequest, SkippedEntity};

/// CLI progress callback that prints styled output to stdout
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        if phase != Phase::Complete {
            println!("{}...", phase.to_string().emphasis());
        }
    }

    async fn on_push(&self, remote: &str, branch_count: usize, status: PushStatus) {
        match &status {
            PushStatus::Started => {
                println!(
                    "  Pushing {} branches to {}...",
                    branch_count.accent(),
                    remote.accent()
                );
            }
            PushStatus::Success => {
                println!("  {} Pushed {} branches", check(), branch_count.emphasis());
            }
            PushStatus::Failed(_) => {
                eprintln!(
                    "  {} Push to {} {}",
                    cross(),
                    remote.accent().for_stderr(),
                    status.to_string().error()
                );
            }
        }
    }

    async fn on_pr_created(&self, head: &str, pr: &PullRequest) {
        let pr_num = format!("#{}", pr.number);
        println!(
            "  {} Created PR {} {} {}",
            check(),
            pr_num.accent(),
            arrow(),
            head.emphasis()
        );
        println!("    {}", hyperlink_url(Stream::Stdout, &pr.html_url));
    }

    async fn on_pr_skipped(&self, head: &str, reason: &str) {
        println!("  {} {} {}", bullet(), head.accent(), reason.muted());
    }

    async fn on_error(&self, err: &Error) {
        eprintln!("{}: {}", "error".error(), err);
    }

    async fn on_message(&self, message: &str) {
        println!("{message}");
    }
}

/// List skipped entities under a stage summary
pub fn print_skipped(skipped: &[SkippedEntity]) {
    if skipped.is_empty() {
        return;
    }

    println!("{} skipped:", skipped.len().to_string().warn().for_stdout());
    for entity in skipped {
        println!("  {} {} {}", bullet(), entity.name.accent(), entity.reason.muted());
    }
}
