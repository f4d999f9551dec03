//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, CORS, request ID)
//! - Bind the server to a listener and serve until shutdown
//!
//! # Design Decisions
//! - CORS is fully permissive: the browser player fetches ranges
//!   cross-origin and the ranged responses additionally carry their
//!   own explicit CORS headers
//! - The timeout layer covers response-header production only; video
//!   bodies keep streaming past it

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::anilist::handlers as api;
use crate::config::RelayConfig;
use crate::http::request::RequestIdLayer;
use crate::proxy::handler::proxy_video;
use crate::upstream::UpstreamPool;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub pool: Arc<UpstreamPool>,
}

/// HTTP server for the relay backend.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and pool.
    pub fn new(config: Arc<RelayConfig>, pool: Arc<UpstreamPool>) -> Self {
        let request_timeout = Duration::from_secs(config.listener.request_timeout_secs);
        let state = AppState { config, pool };

        let router = Router::new()
            .route("/health", get(api::health_check))
            .route("/search/{query}", get(api::search_anime))
            .route("/anime/{id}", get(api::get_anime))
            .route("/trending", get(api::get_trending))
            .route("/popular", get(api::get_popular))
            .route("/latest", get(api::get_latest))
            .route("/sources", get(api::get_sources))
            .route("/proxy", get(proxy_video))
            .route("/anilist/user", post(api::anilist_user))
            .route("/continue-watching", post(api::continue_watching))
            .route("/anilist/update-progress", post(api::update_progress))
            .route("/anilist/oauth-url", get(api::oauth_url))
            .route("/anilist/exchange-code", post(api::exchange_code))
            .with_state(state)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        Self { router }
    }

    /// Run the server, accepting connections on the given listener
    /// until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
