//! Passthrough handlers for AniList queries, OAuth, and the sources
//! lookup.
//!
//! # Responsibilities
//! - Forward fixed GraphQL documents and relay the JSON verbatim
//! - Exchange OAuth codes and proxy token-bearing mutations
//! - Forward the sources lookup to the local stream resolver
//!
//! # Design Decisions
//! - No state, no range handling; every handler is a single
//!   request/response translation through the shared pool client
//! - The listing endpoints keep the original soft-error contract: an
//!   upstream rejection yields a 200 with an `{"error": …}` body

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::anilist::queries;
use crate::anilist::types::{
    AccessTokenRequest, ExchangeCodeParams, PageParams, SourcesParams, UpdateProgressRequest,
};
use crate::http::server::AppState;

type ApiResult = Result<Json<Value>, (StatusCode, String)>;

/// Handler for `GET /health`.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Handler for `GET /search/{query}`.
pub async fn search_anime(State(state): State<AppState>, Path(query): Path<String>) -> ApiResult {
    let response = post_graphql(
        &state,
        queries::SEARCH_MEDIA,
        json!({ "search": query }),
        None,
    )
    .await
    .map_err(upstream_failed)?;

    let value: Value = response.json().await.map_err(upstream_failed)?;
    Ok(Json(extract(&value, "/data/Page/media")))
}

/// Handler for `GET /anime/{id}`.
pub async fn get_anime(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult {
    let response = post_graphql(&state, queries::MEDIA_BY_ID, json!({ "id": id }), None)
        .await
        .map_err(upstream_failed)?;

    if !response.status().is_success() {
        return Ok(Json(json!({ "error": "Anime not found" })));
    }

    let value: Value = response.json().await.map_err(upstream_failed)?;
    Ok(Json(extract(&value, "/data/Media")))
}

/// Handler for `GET /trending`.
pub async fn get_trending(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult {
    paged_media(&state, queries::TRENDING_MEDIA, params, "Could not fetch trending anime").await
}

/// Handler for `GET /popular`.
pub async fn get_popular(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult {
    paged_media(&state, queries::POPULAR_MEDIA, params, "Could not fetch popular anime").await
}

/// Handler for `GET /latest`.
pub async fn get_latest(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> ApiResult {
    paged_media(&state, queries::LATEST_MEDIA, params, "Could not fetch latest anime").await
}

/// Handler for `GET /sources`. Forwards the lookup to the local stream
/// resolver and relays its JSON. Failures come back as soft errors so
/// the player can fall through to another source.
pub async fn get_sources(
    State(state): State<AppState>,
    Query(params): Query<SourcesParams>,
) -> Json<Value> {
    let payload = json!({
        "anilist_id": params.anilist_id,
        "title": params.title,
        "episode": params.episode,
        "dub": params.dub,
    });

    let response = state
        .pool
        .client()
        .post(&state.config.sources.endpoint)
        .json(&payload)
        .send()
        .await;

    match response {
        Ok(response) if response.status().is_success() => match response.json::<Value>().await {
            Ok(value) => Json(value),
            Err(err) => Json(json!({ "error": err.to_string() })),
        },
        Ok(_) => Json(json!({ "error": "Sources not found" })),
        Err(err) => Json(json!({ "error": err.to_string() })),
    }
}

/// Handler for `POST /anilist/user`.
pub async fn anilist_user(
    State(state): State<AppState>,
    Json(request): Json<AccessTokenRequest>,
) -> ApiResult {
    let value = authed_graphql(
        &state,
        queries::VIEWER,
        Value::Null,
        &request.access_token,
    )
    .await?;

    if value.get("errors").is_some() {
        return Err((StatusCode::UNAUTHORIZED, "Authentication failed".into()));
    }

    Ok(Json(extract(&value, "/data/Viewer")))
}

/// Handler for `POST /continue-watching`.
///
/// Resolves the viewer id, fetches the CURRENT list, and flattens the
/// nested lists into one recency-sorted entries array.
pub async fn continue_watching(
    State(state): State<AppState>,
    Json(request): Json<AccessTokenRequest>,
) -> ApiResult {
    let viewer = authed_graphql(
        &state,
        queries::VIEWER_ID,
        Value::Null,
        &request.access_token,
    )
    .await?;

    let user_id = viewer
        .pointer("/data/Viewer/id")
        .and_then(Value::as_i64)
        .ok_or((StatusCode::UNAUTHORIZED, "Invalid access token".to_string()))?;

    let value = authed_graphql(
        &state,
        queries::CONTINUE_WATCHING,
        json!({ "userId": user_id }),
        &request.access_token,
    )
    .await?;

    if value.get("errors").is_some() {
        return Ok(Json(json!({ "entries": [] })));
    }

    let mut entries: Vec<Value> = value
        .pointer("/data/MediaListCollection/lists")
        .and_then(Value::as_array)
        .map(|lists| {
            lists
                .iter()
                .filter_map(|list| list.get("entries").and_then(Value::as_array))
                .flatten()
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    entries.sort_by_key(|entry| {
        std::cmp::Reverse(entry.get("updatedAt").and_then(Value::as_i64).unwrap_or(0))
    });

    Ok(Json(json!({ "entries": entries })))
}

/// Handler for `POST /anilist/update-progress`.
pub async fn update_progress(
    State(state): State<AppState>,
    Json(request): Json<UpdateProgressRequest>,
) -> ApiResult {
    let status = if request.episode >= request.total_episodes {
        "COMPLETED"
    } else {
        "CURRENT"
    };

    let response = post_graphql(
        &state,
        queries::UPDATE_PROGRESS,
        json!({
            "mediaId": request.media_id,
            "progress": request.episode,
            "status": status,
        }),
        Some(&request.access_token),
    )
    .await
    .map_err(upstream_failed)?;

    if !response.status().is_success() {
        return Err((StatusCode::BAD_REQUEST, "Failed to update progress".into()));
    }

    let value: Value = response.json().await.map_err(upstream_failed)?;

    if let Some(errors) = value.get("errors").and_then(Value::as_array) {
        let message = errors
            .first()
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        return Err((StatusCode::BAD_REQUEST, format!("AniList error: {message}")));
    }

    Ok(Json(json!({
        "success": true,
        "message": format!(
            "Updated progress: Episode {}/{} - Status: {}",
            request.episode, request.total_episodes, status
        ),
        "data": extract(&value, "/data/SaveMediaListEntry"),
    })))
}

/// Handler for `GET /anilist/oauth-url`.
pub async fn oauth_url(State(state): State<AppState>) -> Json<Value> {
    let anilist = &state.config.anilist;
    let url = format!(
        "{}/authorize?client_id={}&redirect_uri={}&response_type=code",
        anilist.oauth_url, anilist.oauth_client_id, anilist.oauth_redirect_uri
    );
    Json(json!({ "oauth_url": url }))
}

/// Handler for `POST /anilist/exchange-code`.
pub async fn exchange_code(
    State(state): State<AppState>,
    Query(params): Query<ExchangeCodeParams>,
) -> ApiResult {
    let anilist = &state.config.anilist;
    let payload = json!({
        "grant_type": "authorization_code",
        "client_id": anilist.oauth_client_id,
        "client_secret": anilist.oauth_client_secret,
        "redirect_uri": anilist.oauth_redirect_uri,
        "code": params.code,
    });

    let response = state
        .pool
        .client()
        .post(format!("{}/token", anilist.oauth_url))
        .json(&payload)
        .send()
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, format!("Token exchange failed: {e}")))?;

    if !response.status().is_success() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Failed to exchange code for token".into(),
        ));
    }

    let value: Value = response
        .json()
        .await
        .map_err(|e| (StatusCode::BAD_GATEWAY, format!("Token exchange failed: {e}")))?;
    Ok(Json(value))
}

/// Forward a GraphQL document through the shared pool client.
async fn post_graphql(
    state: &AppState,
    query: &str,
    variables: Value,
    token: Option<&str>,
) -> Result<reqwest::Response, reqwest::Error> {
    let body = if variables.is_null() {
        json!({ "query": query })
    } else {
        json!({ "query": query, "variables": variables })
    };

    let mut request = state
        .pool
        .client()
        .post(&state.config.anilist.api_url)
        .json(&body);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    request.send().await
}

/// GraphQL call whose non-success status means a bad token.
async fn authed_graphql(
    state: &AppState,
    query: &str,
    variables: Value,
    token: &str,
) -> Result<Value, (StatusCode, String)> {
    let response = post_graphql(state, query, variables, Some(token))
        .await
        .map_err(upstream_failed)?;

    if !response.status().is_success() {
        return Err((StatusCode::UNAUTHORIZED, "Invalid access token".into()));
    }

    response.json().await.map_err(upstream_failed)
}

async fn paged_media(
    state: &AppState,
    query: &'static str,
    params: PageParams,
    error_message: &str,
) -> ApiResult {
    let response = post_graphql(
        state,
        query,
        json!({ "page": params.page, "perPage": params.per_page }),
        None,
    )
    .await
    .map_err(upstream_failed)?;

    if !response.status().is_success() {
        return Ok(Json(json!({ "error": error_message })));
    }

    let value: Value = response.json().await.map_err(upstream_failed)?;
    Ok(Json(json!({
        "media": extract(&value, "/data/Page/media"),
        "pageInfo": extract(&value, "/data/Page/pageInfo"),
    })))
}

fn extract(value: &Value, pointer: &str) -> Value {
    value.pointer(pointer).cloned().unwrap_or(Value::Null)
}

fn upstream_failed(err: reqwest::Error) -> (StatusCode, String) {
    (
        StatusCode::BAD_GATEWAY,
        format!("AniList request failed: {err}"),
    )
}
