//! Tracker timestamps.
//!
//! The tracker writes timestamps as `2024-03-07T09:15:42.123-0800`. They are
//! parsed with their own offset; comparisons happen in UTC.

use chrono::{DateTime, FixedOffset};

use crate::error::TimestampError;

const TRACKER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parse a tracker timestamp, keeping its offset.
///
/// Accepts the tracker's own format and RFC 3339.
///
/// # Errors
/// Returns [`TimestampError`] carrying the input when neither format matches.
pub fn parse_tracker_timestamp(value: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let value = value.trim();
    DateTime::parse_from_str(value, TRACKER_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map_err(|_| TimestampError(value.to_string()))
}

/// Date as written by the tracker, `D-M-YYYY` without padding.
pub fn display_date(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format("%-d-%-m-%Y").to_string()
}
