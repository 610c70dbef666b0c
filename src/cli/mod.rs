//! CLI commands
//!
//! Command implementations for the `classmark` binary.

mod auth;
mod branches;
mod context;
mod fetch;
mod progress;
mod pull_requests;
mod push;
mod report;
pub mod style;

pub use auth::{AuthAction, run_auth};
pub use branches::{run_create_branches, run_impose_deadline};
pub use context::CommandContext;
pub use fetch::run_fetch;
pub use pull_requests::run_pull_requests;
pub use push::run_push;
pub use report::run_create_report;
