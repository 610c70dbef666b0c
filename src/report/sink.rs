//! Report output

use crate::error::Result;
use crate::types::SubmissionStatus;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Textual form of commit times in reports
pub const COMMIT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Columns appended after the roster's own; a roster may not reuse them
pub const DERIVED_COLUMNS: [&str; 4] = ["cloned", "submitted", "commit_time", "late"];

/// Write the report to `path`: JSON for a `.json` extension, CSV otherwise
pub fn write_report(path: &Path, records: &[SubmissionStatus]) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
        write_json(writer, records)
    } else {
        write_csv(writer, records)
    }
}

/// Write CSV: roster columns in order, then the derived columns
///
/// Fields that do not apply (commit time and lateness of an unsubmitted
/// student) are empty.
pub fn write_csv<W: Write>(writer: W, records: &[SubmissionStatus]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let roster_columns: Vec<&str> = records
        .first()
        .map(|r| r.fields.iter().map(|(k, _)| k.as_str()).collect())
        .unwrap_or_default();
    csv.write_record(roster_columns.iter().copied().chain(DERIVED_COLUMNS))?;

    for record in records {
        let commit_time = format_commit_time(record);
        let late = record.late.map(|l| l.to_string()).unwrap_or_default();
        let derived = [
            record.cloned.to_string(),
            record.submitted.to_string(),
            commit_time,
            late,
        ];
        csv.write_record(
            record
                .fields
                .iter()
                .map(|(_, v)| v.as_str())
                .chain(derived.iter().map(String::as_str)),
        )?;
    }

    csv.flush()?;
    Ok(())
}

/// Write a JSON array with one object per record
pub fn write_json<W: Write>(mut writer: W, records: &[SubmissionStatus]) -> Result<()> {
    let rows: Vec<Value> = records
        .iter()
        .map(|record| {
            let mut row: Map<String, Value> = record
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            row.insert("cloned".to_string(), Value::Bool(record.cloned));
            row.insert("submitted".to_string(), Value::Bool(record.submitted));
            row.insert(
                "commit_time".to_string(),
                record
                    .commit_time
                    .map_or(Value::Null, |_| Value::String(format_commit_time(record))),
            );
            row.insert(
                "late".to_string(),
                record.late.map_or(Value::Null, Value::Bool),
            );
            Value::Object(row)
        })
        .collect();

    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

fn format_commit_time(record: &SubmissionStatus) -> String {
    record
        .commit_time
        .map(|t| t.format(COMMIT_TIME_FORMAT).to_string())
        .unwrap_or_default()
}
