//! Request types for the AniList and sources endpoints.

use serde::Deserialize;

/// Pagination parameters shared by the listing endpoints.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 1, per_page: 20 }
    }
}

/// Body of the token-bearing endpoints.
#[derive(Debug, Deserialize)]
pub struct AccessTokenRequest {
    pub access_token: String,
}

/// Body of the progress-update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub media_id: i64,
    pub episode: i64,
    pub total_episodes: i64,
    pub access_token: String,
}

/// Query parameters of the sources lookup.
#[derive(Debug, Deserialize)]
pub struct SourcesParams {
    pub anilist_id: i64,
    pub title: String,
    pub episode: i64,
    #[serde(default)]
    pub dub: bool,
}

/// Query parameters of the OAuth code exchange.
#[derive(Debug, Deserialize)]
pub struct ExchangeCodeParams {
    pub code: String,
}
