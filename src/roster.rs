//! Roster loading
//!
//! The roster is a CSV file with one row per student. Two columns are
//! required (identifier and GitHub username); the extra-time column is
//! optional. Every column is kept so the report can pass it through.

use crate::config::RosterSection;
use crate::deadline::parse_extra_time;
use crate::error::{Error, Result};
use crate::report::DERIVED_COLUMNS;
use crate::types::Student;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load the roster file described by `section`
pub fn load_roster(path: &Path, section: &RosterSection) -> Result<Vec<Student>> {
    if !path.exists() {
        return Err(Error::Roster(format!("roster file {} not found", path.display())));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| Error::Roster(format!("failed to open {}: {e}", path.display())))?;
    let students = parse_roster(file, section).map_err(|e| match e {
        Error::Roster(msg) => Error::Roster(format!("{}: {msg}", path.display())),
        other => Error::Roster(format!("{}: {other}", path.display())),
    })?;

    debug!("Loaded {} roster rows from {}", students.len(), path.display());
    Ok(students)
}

/// Parse roster CSV from any reader
pub fn parse_roster<R: Read>(reader: R, section: &RosterSection) -> Result<Vec<Student>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers: Vec<String> = csv.headers()?.iter().map(ToString::to_string).collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let id_idx = column(&section.id_column)
        .ok_or_else(|| Error::Roster(format!("missing column '{}'", section.id_column)))?;
    let user_idx = column(&section.username_column)
        .ok_or_else(|| Error::Roster(format!("missing column '{}'", section.username_column)))?;
    let extra_idx = column(&section.extra_time_column);

    if let Some(clash) = headers.iter().find(|h| DERIVED_COLUMNS.contains(&h.as_str())) {
        return Err(Error::Roster(format!(
            "column '{clash}' clashes with a report column"
        )));
    }

    let mut seen = HashSet::new();
    let mut students = Vec::new();

    for (line, record) in csv.records().enumerate() {
        let record = record?;
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let identifier = field(id_idx).to_string();
        if identifier.is_empty() {
            // +2: header row and 1-based numbering
            return Err(Error::Roster(format!("row {} has an empty identifier", line + 2)));
        }
        if !seen.insert(identifier.clone()) {
            return Err(Error::Roster(format!("duplicate identifier '{identifier}'")));
        }

        let github_username = Some(field(user_idx))
            .filter(|u| !u.is_empty())
            .map(ToString::to_string);
        let extra_time = parse_extra_time(extra_idx.map(field), &identifier);

        let fields = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), field(i).to_string()))
            .collect();

        students.push(Student {
            identifier,
            github_username,
            extra_time,
            fields,
        });
    }

    Ok(students)
}
