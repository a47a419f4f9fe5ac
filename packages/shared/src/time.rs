//! Time helpers shared between the server and its tests.

use chrono::{DateTime, Local, TimeZone, Utc};

/// Get current Unix timestamp (milliseconds, UTC).
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a Unix timestamp in milliseconds to an RFC 3339 string (UTC).
///
/// Out-of-range values fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339()
}

/// Format a timestamp as a wall-clock time such as `3:04:05 PM`.
pub fn format_clock_time<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .with_timezone(tz)
        .format("%-I:%M:%S %p")
        .to_string()
}

/// Format a timestamp as a wall-clock time in the server's local time zone.
pub fn format_local_clock_time(millis: i64) -> String {
    format_clock_time(millis, &Local)
}
