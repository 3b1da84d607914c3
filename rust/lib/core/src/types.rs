use chrono::{DateTime, SecondsFormat, Utc};

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Get the current time as an RFC 3339 string.
///
/// Fixed microsecond precision with a `Z` suffix, so timestamps compare
/// lexically in chronological order (they are used in `ORDER BY`).
pub fn now_rfc3339() -> String {
    format_rfc3339(Utc::now())
}

/// Format a UTC instant the same way as [`now_rfc3339`].
pub fn format_rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
