//! AniList and sources collaborator endpoints.
//!
//! # Data Flow
//! ```text
//! player / frontend
//!     → handlers.rs (axum handlers, one translation each)
//!     → queries.rs  (fixed GraphQL documents)
//!     → shared pool client → graphql.anilist.co / sources resolver
//!     → JSON relayed back unmodified
//! ```

pub mod handlers;
pub mod queries;
pub mod types;
