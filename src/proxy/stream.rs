//! Chunked byte streaming from the upstream host.
//!
//! # Responsibilities
//! - Open one ranged (or unranged) GET against the upstream
//! - Produce a lazy, ordered, finite sequence of byte chunks
//! - Release the pool slot when the stream is dropped, whether it was
//!   drained or abandoned mid-way
//!
//! # Design Decisions
//! - Pull-based: the outbound HTTP writer drives pacing, so a stalled
//!   client suspends the upstream read instead of buffering
//! - Chunks larger than the configured wire size are re-split; nothing
//!   beyond one chunk is ever buffered
//! - Dropping the session aborts the in-flight upstream read, so an
//!   abandoned client stops consuming upstream bandwidth

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::stream::{self, BoxStream};
use futures_util::{Stream, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, RANGE};
use reqwest::{Response, StatusCode};
use tokio::sync::OwnedSemaphorePermit;

use crate::proxy::error::ProxyError;
use crate::proxy::range::ByteRange;
use crate::upstream::UpstreamPool;

/// One upstream connection bound to one fetched interval.
///
/// Consumed exactly once; the pool permit and the upstream connection
/// are released on drop.
pub struct StreamSession {
    inner: BoxStream<'static, Result<Bytes, ProxyError>>,
    _permit: OwnedSemaphorePermit,
}

impl Stream for StreamSession {
    type Item = Result<Bytes, ProxyError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().inner.poll_next_unpin(cx)
    }
}

/// Open a ranged fetch for exactly `[range.start, range.end]`.
///
/// The upstream must answer 200 or 206; anything else is
/// `UpstreamBadStatus` and no body is consumed.
pub async fn open_ranged(
    pool: &UpstreamPool,
    url: &str,
    headers: &HeaderMap,
    range: ByteRange,
    chunk_size: usize,
) -> Result<StreamSession, ProxyError> {
    let permit = pool.checkout().await?;

    let mut request_headers = headers.clone();
    let range_value = HeaderValue::from_str(&range.header_value())
        .map_err(|e| ProxyError::Internal(e.to_string()))?;
    request_headers.insert(RANGE, range_value);

    let response = pool
        .client()
        .get(url)
        .headers(request_headers)
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
        return Err(ProxyError::UpstreamBadStatus(status));
    }

    Ok(chunked_session(response, permit, chunk_size))
}

/// Open an unranged fetch and relay whatever the upstream sends.
///
/// Used when the total length is unknown; there are no range semantics
/// to enforce, so the body is relayed verbatim.
pub async fn open_full(
    pool: &UpstreamPool,
    url: &str,
    headers: &HeaderMap,
    chunk_size: usize,
) -> Result<StreamSession, ProxyError> {
    let permit = pool.checkout().await?;

    let response = pool.client().get(url).headers(headers.clone()).send().await?;

    if !response.status().is_success() {
        tracing::warn!(
            url = %url,
            status = %response.status(),
            "relaying unranged upstream response with non-success status"
        );
    }

    Ok(chunked_session(response, permit, chunk_size))
}

fn chunked_session(
    response: Response,
    permit: OwnedSemaphorePermit,
    chunk_size: usize,
) -> StreamSession {
    let inner = response
        .bytes_stream()
        .flat_map(move |item| {
            let parts = match item {
                Ok(bytes) => split_chunk(bytes, chunk_size),
                Err(err) => vec![Err(ProxyError::from(err))],
            };
            stream::iter(parts)
        })
        .boxed();

    StreamSession {
        inner,
        _permit: permit,
    }
}

/// Re-split a network read into wire-sized chunks. `Bytes::split_to`
/// is a refcount bump, not a copy.
fn split_chunk(mut bytes: Bytes, chunk_size: usize) -> Vec<Result<Bytes, ProxyError>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::with_capacity(bytes.len() / chunk_size + 1);
    while bytes.len() > chunk_size {
        parts.push(Ok(bytes.split_to(chunk_size)));
    }
    parts.push(Ok(bytes));
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lens(parts: Vec<Result<Bytes, ProxyError>>) -> Vec<usize> {
        parts.into_iter().map(|p| p.unwrap().len()).collect()
    }

    #[test]
    fn test_small_read_passes_through() {
        let parts = split_chunk(Bytes::from(vec![7u8; 100]), 8192);
        assert_eq!(lens(parts), vec![100]);
    }

    #[test]
    fn test_large_read_is_resplit() {
        let parts = split_chunk(Bytes::from(vec![7u8; 20_000]), 8192);
        assert_eq!(lens(parts), vec![8192, 8192, 3616]);
    }

    #[test]
    fn test_exact_multiple() {
        let parts = split_chunk(Bytes::from(vec![7u8; 16_384]), 8192);
        assert_eq!(lens(parts), vec![8192, 8192]);
    }

    #[test]
    fn test_order_preserved() {
        let data: Vec<u8> = (0..20_000).map(|i| (i % 256) as u8).collect();
        let parts = split_chunk(Bytes::from(data.clone()), 8192);
        let rejoined: Vec<u8> = parts
            .into_iter()
            .flat_map(|p| p.unwrap().to_vec())
            .collect();
        assert_eq!(rejoined, data);
    }

    #[test]
    fn test_empty_read_yields_nothing() {
        assert!(split_chunk(Bytes::new(), 8192).is_empty());
    }
}
