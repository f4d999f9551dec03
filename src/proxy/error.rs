//! Error taxonomy for the relay path.
//!
//! # Responsibilities
//! - Classify failures into a small, stable set of variants
//! - Map each variant to an HTTP status for the client
//! - Distinguish pre-header failures (recoverable into a status+body)
//!   from mid-stream failures (connection close only)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures that can occur while relaying an upstream resource.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Malformed or unsatisfiable `Range` header. Maps to 416; no
    /// upstream fetch is attempted once this is raised.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Connect/timeout/transport-level failure reaching the origin.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Origin answered a data or probe request with a status outside
    /// {200, 206}.
    #[error("Upstream returned status {0}")]
    UpstreamBadStatus(StatusCode),

    /// Anything else. Maps to 500.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// HTTP status this error maps to when no headers have been sent.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidRange(_) => StatusCode::RANGE_NOT_SATISFIABLE,
            ProxyError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            ProxyError::UpstreamBadStatus(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        // Transport-level problems (refused connect, timeouts, resets
        // mid-body) all surface as a 502 to the player, which reissues
        // a fresh range request on its own.
        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
            ProxyError::UpstreamUnavailable(err.to_string())
        } else {
            ProxyError::Internal(err.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ProxyError::InvalidRange("start > end".into()).status(),
            StatusCode::RANGE_NOT_SATISFIABLE
        );
        assert_eq!(
            ProxyError::UpstreamUnavailable("connect refused".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::UpstreamBadStatus(StatusCode::FORBIDDEN).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ProxyError::Internal("oops".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_range_body_is_explanatory() {
        let err = ProxyError::InvalidRange("no digits on either side".into());
        assert!(err.to_string().starts_with("Invalid range:"));
    }
}
