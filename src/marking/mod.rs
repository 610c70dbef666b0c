//! Push/pull-request orchestration against the marking repository
//!
//! Three steps, each safe to re-run:
//! 1. Remote resolution - find or create the marking repository and register it
//! 2. Push - send every local branch to the marking remote
//! 3. Pull requests - plan `{id}-mark` into `{id}-feedback` PRs, then create
//!    them one at a time with a fixed delay in between

mod execute;
mod plan;
mod progress;

pub use execute::{PullRequestResult, PushResult, execute_pull_requests, push_branches};
pub use plan::{
    MarkingRemote, PrToCreate, PullRequestPlan, create_pull_request_plan, resolve_marking_remote,
};
pub use progress::{NoopProgress, Phase, ProgressCallback, PushStatus};
