//! Short date rendering for picker descriptions

use chrono::{DateTime, Utc};

const SHORT_DATE: &str = "%b %-d, %Y";

/// Renders an RFC 3339 timestamp as `Oct 18, 2026`
///
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_date(datetime: &str) -> String {
    DateTime::parse_from_rfc3339(datetime)
        .map(|dt| dt.format(SHORT_DATE).to_string())
        .unwrap_or_else(|_| datetime.to_string())
}

/// Renders a Unix timestamp (seconds, as text) as `Oct 18, 2026`
///
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_unix(seconds: &str) -> String {
    seconds
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|dt| dt.format(SHORT_DATE).to_string())
        .unwrap_or_else(|| seconds.to_string())
}
