//! Spoofed request headers for upstream fetches.
//!
//! Hotlink-protected hosts reject requests whose `Referer` does not
//! match their own site, so every upstream request carries a
//! caller-supplied Referer plus a fixed browser identity. Kept as one
//! data value rather than literals scattered through the fetch paths.

use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, CACHE_CONTROL, CONNECTION, REFERER,
    USER_AGENT,
};

/// Browser identity presented to the upstream host.
pub const SPOOFED_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.6099.199 Safari/537.36";

/// Accept line of a browser video element.
pub const VIDEO_ACCEPT: &str =
    "video/webm,video/ogg,video/*;q=0.9,application/ogg;q=0.7,audio/*;q=0.6,*/*;q=0.5";

/// Build the base header set for all upstream requests.
///
/// `Accept-Encoding: identity` forces uncompressed transfer so the
/// advertised content length is byte-accurate for range arithmetic.
/// An unparsable Referer is dropped rather than failing the request.
pub fn spoofed_headers(referer: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(referer) {
        headers.insert(REFERER, value);
    }
    headers.insert(USER_AGENT, HeaderValue::from_static(SPOOFED_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(VIDEO_ACCEPT));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("identity"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}
