//! Video relay subsystem.
//!
//! # Data Flow
//! ```text
//! player request
//!     → handler.rs (orchestration, mode selection)
//!     → probe.rs  (length/type discovery, HEAD → ranged-GET fallback)
//!     → range.rs  (parse, clamp, truncate)
//!     → stream.rs (single upstream GET → chunked byte stream)
//!     → headers.rs (spoofed upstream identity)
//!     → error.rs  (416 / 502 / 500 mapping)
//! ```

pub mod error;
pub mod handler;
pub mod headers;
pub mod probe;
pub mod range;
pub mod stream;

pub use error::ProxyError;
pub use range::{parse_range, ByteRange, MAX_CHUNK};
