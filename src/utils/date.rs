//! Canonical timestamp form for published dates.
//!
//! All timestamps are stored as UTC `YYYY-MM-DDTHH:MM:SS` strings so that
//! plain string comparison matches chronological order.

use chrono::{DateTime, NaiveDateTime};

/// `strftime` pattern of the canonical form.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format a UTC instant in canonical form.
pub fn canonical(time: NaiveDateTime) -> String {
    time.format(CANONICAL_FORMAT).to_string()
}

/// Convert seconds since the unix epoch to a naive UTC datetime.
pub fn from_unix_seconds(seconds: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.naive_utc())
}

/// Parse a canonical timestamp back.
#[cfg(test)]
pub fn parse_canonical(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, CANONICAL_FORMAT).ok()
}
