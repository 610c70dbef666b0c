//! Error types for classmark

use thiserror::Error;

/// Errors produced by the submission engine and its collaborators
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid configuration file, section or key
    #[error("configuration error: {0}")]
    Config(String),

    /// Roster file absent, unreadable, or missing required columns
    #[error("roster error: {0}")]
    Roster(String),

    /// No usable authentication credential
    #[error("authentication error: {0}")]
    Auth(String),

    /// Local git storage or transport fault
    #[error("git error: {0}")]
    Git(String),

    /// A branch changed between lookup and update
    #[error("branch {0} was changed concurrently")]
    BranchMoved(String),

    /// GitHub API fault
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// The platform refused to create something because it already exists
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// The marking repository could not be created
    #[error("failed to create marking repository {0}")]
    RepositoryCreation(String),

    /// Pull requests were requested before the marking remote was registered
    #[error("marking remote '{0}' is not configured - run `classmark push` first")]
    MarkingRemoteNotConfigured(String),

    /// The roster is non-empty but no student has a synchronized branch
    #[error(
        "no roster entry has a matching branch - run `classmark create-branches` before reporting"
    )]
    NoBranchesForRoster,

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal invariant broken
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        if is_already_exists(&err) {
            Self::AlreadyExists(github_message(&err))
        } else {
            Self::GitHubApi(github_message(&err))
        }
    }
}

/// HTTP status of a GitHub error response, if the error carries one
pub(crate) fn status_code(err: &octocrab::Error) -> Option<u16> {
    match err {
        octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
        _ => None,
    }
}

/// GitHub reports duplicates as 422 with "already exists" in the message or
/// in one of the validation errors.
fn is_already_exists(err: &octocrab::Error) -> bool {
    let octocrab::Error::GitHub { source, .. } = err else {
        return false;
    };
    if source.status_code.as_u16() != 422 {
        return false;
    }
    source.message.contains("already exists")
        || source
            .errors
            .iter()
            .flatten()
            .any(|e| e.to_string().contains("already exists"))
}

fn github_message(err: &octocrab::Error) -> String {
    match err {
        octocrab::Error::GitHub { source, .. } => {
            let details: Vec<String> = source
                .errors
                .iter()
                .flatten()
                .filter_map(|e| e.get("message").and_then(|m| m.as_str()))
                .map(ToString::to_string)
                .collect();
            if details.is_empty() {
                source.message.clone()
            } else {
                format!("{} ({})", source.message, details.join("; "))
            }
        }
        other => other.to_string(),
    }
}

/// Result type alias for classmark operations
pub type Result<T> = std::result::Result<T, Error>;
