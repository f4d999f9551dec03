//! Upstream content probing.
//!
//! # Responsibilities
//! - Learn a resource's total length and content type before serving
//! - Degrade gracefully when the host refuses HEAD requests
//!
//! # Design Decisions
//! - A total length of 0 is the sentinel for "unknown/unbounded" and
//!   selects full-stream relaying downstream; it never means an empty
//!   resource
//! - The fallback fetches only the first KiB and reads the total off
//!   the `Content-Range` header

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, RANGE};
use reqwest::Client;

use crate::proxy::error::ProxyError;
use crate::upstream::UpstreamPool;

/// Content type assumed when the upstream does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "video/mp4";

/// Window requested by the fallback probe.
const PROBE_RANGE: &str = "bytes=0-1023";

/// What a probe learned about an upstream resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    /// Total resource length in bytes; 0 means unknown.
    pub total_length: u64,
    /// Declared content type.
    pub content_type: String,
}

/// Probe `url` for its length and type.
///
/// Tries a HEAD request first; on any failure falls back to a 1 KiB
/// ranged GET and extracts the total from `Content-Range`. Only when
/// both paths fail does this return `UpstreamUnavailable`.
pub async fn probe(
    pool: &UpstreamPool,
    url: &str,
    headers: &HeaderMap,
) -> Result<ResourceInfo, ProxyError> {
    let _permit = pool.checkout().await?;

    match head_probe(pool.client(), url, headers).await {
        Ok(info) => Ok(info),
        Err(err) => {
            tracing::debug!(url = %url, error = %err, "HEAD probe failed, falling back to ranged GET");
            ranged_probe(pool.client(), url, headers).await
        }
    }
}

async fn head_probe(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
) -> Result<ResourceInfo, ProxyError> {
    let response = client.head(url).headers(headers.clone()).send().await?;

    // An unparsable length is treated like a failed probe so the
    // ranged fallback gets a chance to learn the real total.
    let total_length = match response.headers().get(CONTENT_LENGTH) {
        Some(value) => value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .ok_or_else(|| {
                ProxyError::Internal("unparsable content-length in HEAD response".into())
            })?,
        None => 0,
    };

    Ok(ResourceInfo {
        total_length,
        content_type: content_type_or_default(response.headers().get(CONTENT_TYPE)),
    })
}

async fn ranged_probe(
    client: &Client,
    url: &str,
    headers: &HeaderMap,
) -> Result<ResourceInfo, ProxyError> {
    let mut probe_headers = headers.clone();
    probe_headers.insert(RANGE, HeaderValue::from_static(PROBE_RANGE));

    let response = client.get(url).headers(probe_headers).send().await?;

    let total_length = response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(total_from_content_range)
        .unwrap_or(0);

    Ok(ResourceInfo {
        total_length,
        content_type: content_type_or_default(response.headers().get(CONTENT_TYPE)),
    })
}

/// Extract the total length from a `Content-Range` value, e.g.
/// `bytes 0-1023/123456789` → 123456789. `*` or garbage yields None.
fn total_from_content_range(value: &str) -> Option<u64> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

fn content_type_or_default(value: Option<&HeaderValue>) -> String {
    value
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_from_content_range() {
        assert_eq!(
            total_from_content_range("bytes 0-1023/123456789"),
            Some(123_456_789)
        );
        assert_eq!(total_from_content_range("bytes 0-1023/*"), None);
        assert_eq!(total_from_content_range("garbage"), None);
        assert_eq!(total_from_content_range(""), None);
    }

    #[test]
    fn test_content_type_default() {
        assert_eq!(content_type_or_default(None), "video/mp4");
        let value = HeaderValue::from_static("video/webm");
        assert_eq!(content_type_or_default(Some(&value)), "video/webm");
    }
}
