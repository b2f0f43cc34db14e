//! CORS header injection
//!
//! The soundboard page is fetched from `file://` or LAN origins during
//! development, so every response carries the same permissive header set.

use hyper::header::HeaderValue;
use hyper::Response;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Append the three CORS headers to a response.
///
/// Applied after the handler has produced the response, regardless of its
/// status code, so 404s and 304s advertise the same policy as 200s.
pub fn apply<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}
