//! Byte-range parsing and arithmetic.
//!
//! # Responsibilities
//! - Parse `Range` header values of the form `bytes=<start>-<end>`
//! - Clamp out-of-bound ends instead of rejecting them
//! - Reject structural malformedness and inverted ranges
//!
//! # Design Decisions
//! - Ends past the resource are clamped, not errors (players routinely
//!   over-ask near the tail of a file)
//! - `bytes=-N` with N larger than the resource clamps to the whole
//!   resource via saturating subtraction
//! - Callers must skip parsing entirely when the total length is
//!   unknown; this module assumes `total > 0`

use crate::proxy::error::ProxyError;

/// Upper bound on the span served for a single request, in bytes.
///
/// Requests asking for more are truncated to this size and the player
/// is expected to come back for the rest with further range requests,
/// exactly as it would against a native byte-range server with a
/// best-effort segment size. Bounds worst-case latency per request.
pub const MAX_CHUNK: u64 = 2 * 1024 * 1024;

/// An inclusive byte interval within a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the interval.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// The synthesized range for a request that carried no `Range`
    /// header: the first `max` bytes (or the whole resource if smaller).
    pub fn initial(total: u64, max: u64) -> Self {
        Self {
            start: 0,
            end: total.min(max) - 1,
        }
    }

    /// Shrink the interval so it covers at most `max` bytes, keeping
    /// the start fixed.
    pub fn truncate(self, max: u64) -> Self {
        if self.len() > max {
            Self {
                start: self.start,
                end: self.start + max - 1,
            }
        } else {
            self
        }
    }

    /// Render the `Range` request-header value for this interval.
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }

    /// Render the `Content-Range` response-header value for this
    /// interval within a resource of `total` bytes.
    pub fn content_range(&self, total: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, total)
    }
}

/// Parse a `Range` header against a resource of `total` bytes.
///
/// Accepted forms: `bytes=A-B`, `bytes=A-` (to end of resource), and
/// `bytes=-N` (last N bytes). Anything else is `InvalidRange`.
pub fn parse_range(header: &str, total: u64) -> Result<ByteRange, ProxyError> {
    let spec = header
        .trim()
        .strip_prefix("bytes=")
        .ok_or_else(|| ProxyError::InvalidRange("missing bytes= prefix".into()))?;

    let (start_str, end_str) = spec
        .split_once('-')
        .ok_or_else(|| ProxyError::InvalidRange("missing '-' separator".into()))?;

    let start_val = parse_bound(start_str)?;
    let end_val = parse_bound(end_str)?;

    let (start, end) = match (start_val, end_val) {
        // bytes=A-B
        (Some(start), Some(end)) => (start, end),
        // bytes=A- : open-ended to end of resource
        (Some(start), None) => (start, total - 1),
        // bytes=-N : last N bytes; a suffix longer than the resource
        // clamps the start to 0 rather than failing
        (None, Some(suffix)) => (total.saturating_sub(suffix), total - 1),
        // bytes=- : no digits on either side
        (None, None) => {
            return Err(ProxyError::InvalidRange("no bounds given".into()));
        }
    };

    let end = end.min(total - 1);

    if start > end {
        return Err(ProxyError::InvalidRange(format!(
            "start {start} > end {end}"
        )));
    }

    Ok(ByteRange { start, end })
}

fn parse_bound(s: &str) -> Result<Option<u64>, ProxyError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(None);
    }
    s.parse()
        .map(Some)
        .map_err(|_| ProxyError::InvalidRange(format!("non-numeric bound {s:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_range_unchanged() {
        let r = parse_range("bytes=200-1023", 10_000).unwrap();
        assert_eq!(r, ByteRange { start: 200, end: 1023 });
        assert_eq!(r.len(), 824);
    }

    #[test]
    fn test_open_ended_range() {
        let r = parse_range("bytes=200-", 10_000).unwrap();
        assert_eq!(r, ByteRange { start: 200, end: 9_999 });
    }

    #[test]
    fn test_suffix_range() {
        let r = parse_range("bytes=-500", 1_000).unwrap();
        assert_eq!(r, ByteRange { start: 500, end: 999 });
        assert_eq!(r.len(), 500);
    }

    #[test]
    fn test_suffix_longer_than_resource_clamps_to_start() {
        let r = parse_range("bytes=-5000", 1_000).unwrap();
        assert_eq!(r, ByteRange { start: 0, end: 999 });
    }

    #[test]
    fn test_end_clamped_to_resource() {
        let r = parse_range("bytes=900-2000", 1_000).unwrap();
        assert_eq!(r, ByteRange { start: 900, end: 999 });
    }

    #[test]
    fn test_missing_prefix_rejected() {
        assert!(matches!(
            parse_range("200-1023", 10_000),
            Err(ProxyError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_empty_bounds_rejected() {
        assert!(matches!(
            parse_range("bytes=-", 10_000),
            Err(ProxyError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(matches!(
            parse_range("bytes=abc-def", 10_000),
            Err(ProxyError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(matches!(
            parse_range("bytes=500-100", 10_000),
            Err(ProxyError::InvalidRange(_))
        ));
        // Inversion produced by clamping is also rejected.
        assert!(matches!(
            parse_range("bytes=1500-2000", 1_000),
            Err(ProxyError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_truncate_wide_span() {
        let r = parse_range("bytes=5000000-", 10_000_000)
            .unwrap()
            .truncate(MAX_CHUNK);
        assert_eq!(r, ByteRange { start: 5_000_000, end: 7_097_151 });
        assert_eq!(r.len(), 2_097_152);
        assert_eq!(r.content_range(10_000_000), "bytes 5000000-7097151/10000000");
    }

    #[test]
    fn test_truncate_leaves_narrow_span_alone() {
        let r = ByteRange { start: 10, end: 20 }.truncate(MAX_CHUNK);
        assert_eq!(r, ByteRange { start: 10, end: 20 });
    }

    #[test]
    fn test_initial_range() {
        assert_eq!(
            ByteRange::initial(5_000, MAX_CHUNK),
            ByteRange { start: 0, end: 4_999 }
        );
        assert_eq!(
            ByteRange::initial(10_000_000, MAX_CHUNK),
            ByteRange { start: 0, end: MAX_CHUNK - 1 }
        );
    }

    #[test]
    fn test_header_value_round() {
        let r = ByteRange { start: 0, end: 1023 };
        assert_eq!(r.header_value(), "bytes=0-1023");
    }
}
