//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, chunk sizes > 0)
//! - Validate URLs for the external services
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".into(),
            message: format!("not a valid socket address: {:?}", config.listener.bind_address),
        });
    }

    if config.upstream.max_connections == 0 {
        errors.push(ValidationError {
            field: "upstream.max_connections".into(),
            message: "must be at least 1".into(),
        });
    }

    if config.upstream.connect_timeout_secs == 0 || config.upstream.read_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "upstream".into(),
            message: "timeouts must be greater than zero".into(),
        });
    }

    if config.relay.max_chunk_bytes == 0 {
        errors.push(ValidationError {
            field: "relay.max_chunk_bytes".into(),
            message: "must be greater than zero".into(),
        });
    }

    if config.relay.chunk_size_bytes == 0 {
        errors.push(ValidationError {
            field: "relay.chunk_size_bytes".into(),
            message: "must be greater than zero".into(),
        });
    }

    for (field, value) in [
        ("anilist.api_url", &config.anilist.api_url),
        ("anilist.oauth_url", &config.anilist.oauth_url),
        ("sources.endpoint", &config.sources.endpoint),
    ] {
        if Url::parse(value).is_err() {
            errors.push(ValidationError {
                field: field.into(),
                message: format!("not a valid URL: {value:?}"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
