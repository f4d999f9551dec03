//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! relay. All types derive Serde traits for deserialization from config
//! files, and every field has a default so a minimal (or absent) config
//! file still produces a runnable server.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay backend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Upstream connection pool settings.
    pub upstream: UpstreamConfig,

    /// Video relay policy (chunk sizes, default referer).
    pub relay: RelaySettings,

    /// AniList API and OAuth settings.
    pub anilist: AniListConfig,

    /// Local sources lookup service.
    pub sources: SourcesConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Timeout for producing response headers, in seconds. Body
    /// streaming is not covered by this; long video streams keep going.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Upstream connection pool configuration.
///
/// The pool is the only shared mutable resource in the process: one
/// keep-alive HTTP client plus a semaphore bounding concurrent upstream
/// requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Read timeout for upstream sockets in seconds.
    pub read_timeout_secs: u64,

    /// How long a request may wait for a pool slot, in seconds.
    pub pool_wait_secs: u64,

    /// Maximum concurrent upstream requests.
    pub max_connections: usize,

    /// Maximum idle keep-alive connections retained per host.
    pub max_idle_connections: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
            pool_wait_secs: 10,
            max_connections: 20,
            max_idle_connections: 10,
        }
    }
}

/// Video relay policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Largest span served for a single request, in bytes. Wider
    /// requests are truncated; the player fetches the rest with
    /// follow-up range requests.
    pub max_chunk_bytes: u64,

    /// Size of individual chunks written to the wire.
    pub chunk_size_bytes: usize,

    /// Referer presented upstream when the caller supplies none.
    pub default_referer: String,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            max_chunk_bytes: crate::proxy::range::MAX_CHUNK,
            chunk_size_bytes: 8 * 1024,
            default_referer: "https://example.com".to_string(),
        }
    }
}

/// AniList API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AniListConfig {
    /// GraphQL endpoint URL.
    pub api_url: String,

    /// OAuth authorize/token base URL.
    pub oauth_url: String,

    /// OAuth application client ID.
    pub oauth_client_id: String,

    /// OAuth application client secret.
    pub oauth_client_secret: String,

    /// Redirect URI registered with the OAuth application.
    pub oauth_redirect_uri: String,
}

impl Default for AniListConfig {
    fn default() -> Self {
        Self {
            api_url: "https://graphql.anilist.co".to_string(),
            oauth_url: "https://anilist.co/api/v2/oauth".to_string(),
            oauth_client_id: String::new(),
            oauth_client_secret: String::new(),
            oauth_redirect_uri: String::new(),
        }
    }
}

/// Local sources lookup service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Endpoint accepting `{anilist_id, title, episode, dub}` and
    /// returning candidate stream URLs.
    pub endpoint: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/api/ani-cli/v2/stream".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
