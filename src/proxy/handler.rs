//! The `/proxy` request orchestrator.
//!
//! # Data Flow
//! ```text
//! GET /proxy?url=..&ref=..  [+ optional Range header]
//!     → probe.rs (total length, content type)
//!     → classify: ranged / initial-chunk / full-stream
//!     → range.rs (parse + clamp + truncate)        [ranged modes]
//!     → stream.rs (one upstream GET, chunked body)
//!     → 206/200 response with CORS + cache headers
//! ```
//!
//! # Design Decisions
//! - One pass per request, no state carried across requests
//! - Explicit ranges wider than the chunk cap are truncated, not
//!   honored; the player retrieves the remainder with follow-up
//!   range requests
//! - Errors before headers map to structured statuses; a failure after
//!   streaming has begun can only close the connection

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::http::server::AppState;
use crate::proxy::error::ProxyError;
use crate::proxy::headers::spoofed_headers;
use crate::proxy::probe::{probe, ResourceInfo};
use crate::proxy::range::{parse_range, ByteRange};
use crate::proxy::stream::{open_full, open_ranged, StreamSession};

/// Caching directive attached to every relayed response.
const CACHE_DIRECTIVE: &str = "public, max-age=3600";

/// Query parameters of the `/proxy` endpoint.
#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    /// Upstream resource URL.
    pub url: String,
    /// Referer to spoof; falls back to the configured default.
    #[serde(rename = "ref")]
    pub referer: Option<String>,
}

/// Handler for `GET /proxy`.
pub async fn proxy_video(
    State(state): State<AppState>,
    Query(params): Query<ProxyParams>,
    request_headers: HeaderMap,
) -> Response {
    let range_header = request_headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok());

    match relay(&state, &params, range_header).await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(url = %params.url, error = %err, "proxy request failed");
            err.into_response()
        }
    }
}

async fn relay(
    state: &AppState,
    params: &ProxyParams,
    range_header: Option<&str>,
) -> Result<Response, ProxyError> {
    let settings = &state.config.relay;
    let referer = params
        .referer
        .as_deref()
        .unwrap_or(&settings.default_referer);
    let upstream_headers = spoofed_headers(referer);

    let info = probe(&state.pool, &params.url, &upstream_headers).await?;
    tracing::debug!(
        url = %params.url,
        total_length = info.total_length,
        content_type = %info.content_type,
        range = range_header.unwrap_or("-"),
        "probed upstream resource"
    );

    if info.total_length == 0 {
        // Length unknown: no range semantics apply, relay as received.
        let session = open_full(
            &state.pool,
            &params.url,
            &upstream_headers,
            settings.chunk_size_bytes,
        )
        .await?;
        return full_response(&info, session);
    }

    let range = match range_header {
        // Seek/buffer request from the player. InvalidRange surfaces
        // as a 416 before any data fetch is opened.
        Some(raw) => parse_range(raw, info.total_length)?,
        // No range asked: serve an initial chunk for fast playback start.
        None => ByteRange::initial(info.total_length, settings.max_chunk_bytes),
    };
    let range = range.truncate(settings.max_chunk_bytes);

    let session = open_ranged(
        &state.pool,
        &params.url,
        &upstream_headers,
        range,
        settings.chunk_size_bytes,
    )
    .await?;

    partial_response(range, &info, session)
}

/// 206 response for a served sub-range. The declared `Content-Length`
/// is always the post-truncation span, never the originally requested
/// one.
fn partial_response(
    range: ByteRange,
    info: &ResourceInfo,
    session: StreamSession,
) -> Result<Response, ProxyError> {
    Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(header::CONTENT_RANGE, range.content_range(info.total_length))
        .header(header::ACCEPT_RANGES, "bytes")
        .header(header::CONTENT_LENGTH, range.len())
        .header(header::CONTENT_TYPE, info.content_type.as_str())
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Range")
        .header(header::CACHE_CONTROL, CACHE_DIRECTIVE)
        .body(Body::from_stream(session))
        .map_err(|e| ProxyError::Internal(e.to_string()))
}

/// 200 response relaying an unbounded body; no length or range headers.
fn full_response(info: &ResourceInfo, session: StreamSession) -> Result<Response, ProxyError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, info.content_type.as_str())
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::CACHE_CONTROL, CACHE_DIRECTIVE)
        .body(Body::from_stream(session))
        .map_err(|e| ProxyError::Internal(e.to_string()))
}
