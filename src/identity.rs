//! Mapping GitHub usernames to institutional identifiers

use crate::types::Student;
use std::collections::HashMap;

/// Resolves GitHub usernames to roster identifiers
///
/// Built once per run. Without a roster every username is its own
/// identifier, which keeps unconfigured dry runs usable.
#[derive(Debug, Clone)]
pub enum IdentityResolver {
    /// Lookup table built from the roster
    Rostered(HashMap<String, String>),
    /// No roster configured
    PassThrough,
}

impl IdentityResolver {
    /// Build a resolver from roster rows
    ///
    /// Rows without a username are left out. GitHub usernames are
    /// case-insensitive so lookups are too.
    pub fn from_roster(students: &[Student]) -> Self {
        let mapping = students
            .iter()
            .filter_map(|s| {
                s.github_username
                    .as_deref()
                    .map(|u| (u.to_lowercase(), s.identifier.clone()))
            })
            .collect();
        Self::Rostered(mapping)
    }

    /// Resolve a username; `None` means the caller should skip it
    pub fn resolve(&self, github_username: &str) -> Option<String> {
        match self {
            Self::Rostered(mapping) => mapping.get(&github_username.to_lowercase()).cloned(),
            Self::PassThrough => Some(github_username.to_string()),
        }
    }
}
