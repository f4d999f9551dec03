//! Upstream connectivity subsystem.
//!
//! # Data Flow
//! ```text
//! main (startup)
//!     → UpstreamPool::new (client + semaphore)
//!     → Arc<UpstreamPool> in AppState
//!     → probe / stream / API handlers borrow it per request
//! ```

pub mod pool;

pub use pool::UpstreamPool;
