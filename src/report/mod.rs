//! Submission status reporting
//!
//! [`build_report`] joins the roster with local branch state; [`write_report`]
//! persists the records as CSV or JSON.

mod build;
mod sink;

pub use build::build_report;
pub use sink::{COMMIT_TIME_FORMAT, DERIVED_COLUMNS, write_csv, write_json, write_report};
