//! Timestamp parsing and arithmetic for HAR `startedDateTime` values.

use chrono::{DateTime, FixedOffset};

use crate::error::HarError;

/// Parse an ISO-8601 timestamp with timezone, as written by browser HAR
/// exporters (e.g. `2025-06-01T10:00:00.123+09:00`).
///
/// Every timing computation depends on this field, so an unparseable or
/// missing value is malformed input rather than a skippable record.
pub fn parse_timestamp(ts: &str) -> Result<DateTime<FixedOffset>, HarError> {
    DateTime::parse_from_rfc3339(ts)
        .map_err(|e| HarError::MalformedInput(format!("bad startedDateTime {:?}: {}", ts, e)))
}

/// Signed wall-clock seconds from `start` to `end`, with sub-millisecond
/// precision preserved.
pub fn seconds_between(start: &DateTime<FixedOffset>, end: &DateTime<FixedOffset>) -> f64 {
    (end.timestamp_micros() - start.timestamp_micros()) as f64 / 1_000_000.0
}
