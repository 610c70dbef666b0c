//! Building one status record per roster row

use crate::deadline::effective_deadline;
use crate::error::{Error, Result};
use crate::repo::Repository;
use crate::sync::branch_name;
use crate::types::{BranchKind, Commit, Student, SubmissionStatus};
use chrono::{DateTime, FixedOffset};
use std::collections::HashMap;
use tracing::{debug, info};

/// Build the submission report, one record per student in roster order
///
/// A student is `cloned` when `{identifier}-main` or `{identifier}-master`
/// exists. A tip authored by `scaffold_author` means nothing was submitted.
/// Otherwise the tip's authored time is compared with the student's
/// effective deadline to decide lateness. Fails when the roster is non-empty
/// and no student has a branch at all.
pub fn build_report<R: Repository + ?Sized>(
    repo: &R,
    students: &[Student],
    cutoff: DateTime<FixedOffset>,
    scaffold_author: &str,
) -> Result<Vec<SubmissionStatus>> {
    let branches: HashMap<String, String> = repo
        .local_branches()?
        .into_iter()
        .map(|b| (b.name, b.commit_id))
        .collect();

    let mut records = Vec::with_capacity(students.len());
    let mut cloned_count = 0;

    for student in students {
        let tip = [BranchKind::Main, BranchKind::Master]
            .into_iter()
            .find_map(|kind| branches.get(&branch_name(&student.identifier, kind)));

        let Some(tip) = tip else {
            debug!(student = %student.identifier, "no submission branch");
            records.push(status(student, false, None, None));
            continue;
        };
        cloned_count += 1;

        let commit = repo.commit(tip)?;
        if is_scaffold(&commit, scaffold_author) {
            records.push(status(student, true, None, None));
            continue;
        }

        let deadline = effective_deadline(cutoff, student.extra_time);
        let late = commit.authored_at > deadline;
        records.push(status(student, true, Some(commit.authored_at), Some(late)));
    }

    if !students.is_empty() && cloned_count == 0 {
        return Err(Error::NoBranchesForRoster);
    }

    info!(
        "Report covers {} students, {} with branches",
        records.len(),
        cloned_count
    );
    Ok(records)
}

fn is_scaffold(commit: &Commit, scaffold_author: &str) -> bool {
    commit.author_name == scaffold_author || commit.author_email == scaffold_author
}

fn status(
    student: &Student,
    cloned: bool,
    commit_time: Option<DateTime<FixedOffset>>,
    late: Option<bool>,
) -> SubmissionStatus {
    SubmissionStatus {
        identifier: student.identifier.clone(),
        cloned,
        submitted: commit_time.is_some(),
        commit_time,
        late,
        fields: student.fields.clone(),
    }
}
