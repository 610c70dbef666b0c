//! Per-student effective deadlines

use chrono::{DateTime, FixedOffset, TimeDelta};
use tracing::warn;

/// The deadline a student is held to: base cutoff plus their extension
///
/// An extension that would leave the representable date range is ignored.
pub fn effective_deadline(
    base_cutoff: DateTime<FixedOffset>,
    extra_time: TimeDelta,
) -> DateTime<FixedOffset> {
    base_cutoff.checked_add_signed(extra_time).unwrap_or_else(|| {
        warn!(%base_cutoff, ?extra_time, "extension overflows the deadline, using none");
        base_cutoff
    })
}

/// Parse an extra-time value given in minutes
///
/// Empty or absent values mean no extension. Values that are not a finite
/// number of minutes are logged and treated as no extension for this student
/// only.
pub fn parse_extra_time(raw: Option<&str>, identifier: &str) -> TimeDelta {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return TimeDelta::zero();
    };

    match raw.parse::<f64>() {
        Ok(minutes) if minutes.is_finite() => {
            #[allow(clippy::cast_possible_truncation)]
            let seconds = (minutes * 60.0).round() as i64;
            TimeDelta::try_seconds(seconds).unwrap_or_else(|| {
                warn!(student = %identifier, value = %raw, "extra time out of range, using none");
                TimeDelta::zero()
            })
        }
        _ => {
            warn!(student = %identifier, value = %raw, "unparsable extra time, using none");
            TimeDelta::zero()
        }
    }
}
