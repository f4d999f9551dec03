//! Pooled upstream HTTP client.
//!
//! # Responsibilities
//! - Own the single keep-alive client shared by all request handlers
//! - Bound concurrent upstream requests with a semaphore
//! - Enforce connect/read/pool-wait timeouts
//!
//! # Design Decisions
//! - Built once at process start and injected into handler state; no
//!   ambient singleton
//! - A permit is held for the full life of a streamed body, so a slow
//!   consumer counts against the concurrency bound until its upstream
//!   connection is released

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::config::UpstreamConfig;
use crate::proxy::error::ProxyError;

/// Bounded keep-alive pool for upstream fetches.
pub struct UpstreamPool {
    client: Client,
    permits: Arc<Semaphore>,
    pool_wait: Duration,
}

impl UpstreamPool {
    /// Build the pool from configuration. Called once at startup.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .pool_max_idle_per_host(config.max_idle_connections)
            .redirect(Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_connections)),
            pool_wait: Duration::from_secs(config.pool_wait_secs),
        })
    }

    /// The shared client. Short JSON calls go through this directly;
    /// streaming fetches must hold a permit from [`checkout`].
    ///
    /// [`checkout`]: UpstreamPool::checkout
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Reserve a pool slot, waiting at most the configured pool-wait
    /// timeout. The permit is released when dropped, which ties the
    /// slot's lifetime to the stream (or probe) holding it.
    pub async fn checkout(&self) -> Result<OwnedSemaphorePermit, ProxyError> {
        match tokio::time::timeout(self.pool_wait, self.permits.clone().acquire_owned()).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(ProxyError::Internal("upstream pool closed".into())),
            Err(_) => Err(ProxyError::UpstreamUnavailable(
                "timed out waiting for an upstream pool slot".into(),
            )),
        }
    }

    /// Number of currently available pool slots.
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }
}
