//! Local branch synchronization
//!
//! Two stages write local branches:
//! - `create-branches` mirrors each student's `main`, `master` and
//!   `feedback` branches as `{identifier}-{kind}`
//! - `impose-deadline` freezes each submission as `{identifier}-mark`
//!
//! Both go through [`sync_branch`], which makes re-running either stage safe.

mod branches;
mod create;
mod impose;

pub use branches::{
    MARK_SUFFIX, SyncOutcome, branch_name, mark_branch_name, mark_identifier, submission_branch,
    sync_branch,
};
pub use create::{BranchSyncResult, create_branches};
pub use impose::{DeadlineResult, MarkedBranch, impose_deadline};
