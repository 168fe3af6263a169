//! Cross-origin header injection module
//!
//! Every response leaving the server, whatever its method, path or status,
//! carries the same fixed header set: a wildcard CORS origin, the allowed
//! method list, and a `Cache-Control` that disables client caching. Browsers
//! loading a local build would otherwise cache assets between rebuilds.

use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL,
};
use hyper::Response;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET";
pub const NO_CACHE: &str = "no-store, no-cache, must-revalidate";

/// Inject the fixed header set into a response.
///
/// Called once per request, after dispatch, so the headers are present on
/// every outcome (200, 404, 501, OPTIONS preflight, redirects). Existing
/// values for these names are replaced, never duplicated.
pub fn apply_headers<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static(ALLOW_ORIGIN));
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
}
