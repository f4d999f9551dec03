//! Video relay backend library.
//!
//! An HTTP relay that fetches remote video resources on behalf of a
//! browser-side player and re-serves them with correct byte-range
//! semantics, spoofing the request origin to get past hotlink
//! protection. Also hosts the stateless AniList passthrough endpoints
//! the player's frontend uses for metadata and auth.

pub mod anilist;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod upstream;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::UpstreamPool;
