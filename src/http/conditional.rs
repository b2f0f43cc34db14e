//! Conditional request handling
//!
//! `Last-Modified` / `If-Modified-Since` support, so the browser can replay
//! cached sound clips with a 304 instead of re-downloading them.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Format a filesystem mtime as an HTTP-date (RFC 7231 IMF-fixdate).
pub fn format_http_date(mtime: SystemTime) -> String {
    let dt: DateTime<Utc> = mtime.into();
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP-date from a client header. Invalid dates yield `None` and
/// the request is treated as unconditional.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Check whether a 304 Not Modified applies.
///
/// HTTP dates carry second precision, so the comparison truncates the file
/// mtime to whole seconds before comparing against the client's timestamp.
pub fn check_not_modified(if_modified_since: Option<&str>, mtime: SystemTime) -> bool {
    let Some(client_date) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    let file_date: DateTime<Utc> = mtime.into();
    file_date.timestamp() <= client_date.timestamp()
}
