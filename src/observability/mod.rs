//! Observability subsystem.
//!
//! Structured logging via `tracing`; per-request correlation comes from
//! the request-ID layer in `http`.

pub mod logging;
