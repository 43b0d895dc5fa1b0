//! The fixed textual encoding of timestamps.
//!
//! Timestamps are written as `YYYY-MM-DD HH:MM:SS±HHMM`, for example
//! `2024-03-01 08:30:00+0100`. Sub-second precision is not kept.

use alloc::string::{String, ToString};

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

/// `chrono` format string of the timestamp encoding.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";

/// A timestamp that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("malformed timestamp: {0}")]
    Parse(#[from] chrono::ParseError),
    /// The input was a JSON value of another kind.
    #[error("expected a timestamp string, found {0}")]
    NotText(String),
}

/// Formats a timestamp with [`TIMESTAMP_FORMAT`].
///
/// ```
/// use chrono::DateTime;
/// use jsondto_mapper::timestamp::{format_timestamp, parse_timestamp};
///
/// let ts = DateTime::parse_from_rfc3339("2024-03-01T08:30:00.250+01:00").unwrap();
/// assert_eq!(format_timestamp(&ts), "2024-03-01 08:30:00+0100");
///
/// let back = parse_timestamp("2024-03-01 08:30:00+0100").unwrap();
/// assert_eq!(back.timestamp(), ts.timestamp());
/// ```
pub fn format_timestamp(value: &DateTime<FixedOffset>) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses a timestamp written with [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    Ok(DateTime::parse_from_str(text, TIMESTAMP_FORMAT)?)
}
