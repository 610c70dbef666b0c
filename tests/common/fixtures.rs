//! Test data factories for classmark types

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeDelta};
use classmark::types::{Commit, PullRequest, Student};

/// Author used for template-initialization commits in fixtures
pub const SCAFFOLD: &str = "github-classroom[bot]";

/// Parse an RFC 3339 timestamp
pub fn at(timestamp: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(timestamp).unwrap()
}

/// Create a commit authored by a student
pub fn make_commit(id: &str, parent: Option<&str>, timestamp: &str) -> Commit {
    Commit {
        id: id.to_string(),
        parents: parent.map(ToString::to_string).into_iter().collect(),
        author_name: "Student".to_string(),
        author_email: "student@example.edu".to_string(),
        authored_at: at(timestamp),
    }
}

/// Create a commit authored by the classroom scaffold bot
pub fn make_scaffold_commit(id: &str, timestamp: &str) -> Commit {
    Commit {
        author_name: SCAFFOLD.to_string(),
        author_email: "noreply@github.com".to_string(),
        ..make_commit(id, None, timestamp)
    }
}

/// Create a student with passthrough fields matching the roster columns
pub fn make_student(identifier: &str, username: &str) -> Student {
    Student {
        identifier: identifier.to_string(),
        github_username: Some(username.to_string()),
        extra_time: TimeDelta::zero(),
        fields: vec![
            ("identifier".to_string(), identifier.to_string()),
            ("github_username".to_string(), username.to_string()),
        ],
    }
}

/// Create a student with a deadline extension in minutes
pub fn make_student_with_extra_time(identifier: &str, username: &str, minutes: i64) -> Student {
    let mut student = make_student(identifier, username);
    student.extra_time = TimeDelta::minutes(minutes);
    student
        .fields
        .push(("extra_time".to_string(), minutes.to_string()));
    student
}

/// Create a pull request
pub fn make_pr(number: u64, head: &str, base: &str) -> PullRequest {
    PullRequest {
        number,
        html_url: format!("https://github.com/uni-cs/cw1-marking/pull/{number}"),
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        title: "Marking".to_string(),
    }
}
