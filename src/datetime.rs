//! Date/time utilities for fs-store.

use chrono::{DateTime, Local, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with millisecond precision, e.g. `2023-01-22T07:07:16.440Z`.
///
/// Millisecond precision matches the resolution used by pagination cursors.
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an RFC3339 timestamp into UTC.
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a UTC timestamp in the local timezone for terminal output.
pub fn format_local(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local)
        .format("%Y/%m/%d %H:%M:%S %:z")
        .to_string()
}
