//! Tests for the collaborator endpoints that need no external services.

use axum::http::StatusCode;

mod common;

use common::start_relay_with;
use video_relay::config::RelayConfig;

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_oauth_url_built_from_config() {
    let mut config = RelayConfig::default();
    config.anilist.oauth_client_id = "12345".into();
    config.anilist.oauth_redirect_uri = "https://player.example.org/auth/callback".into();

    let (relay, shutdown) = start_relay_with(config).await;

    let res = client()
        .get(format!("http://{relay}/anilist/oauth-url"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["oauth_url"],
        "https://anilist.co/api/v2/oauth/authorize?client_id=12345&redirect_uri=https://player.example.org/auth/callback&response_type=code"
    );

    shutdown.trigger();
}

#[tokio::test]
async fn test_sources_lookup_failure_is_soft_error() {
    let mut config = RelayConfig::default();
    // Nothing listens here; the endpoint reports the failure in-band.
    config.sources.endpoint = "http://127.0.0.1:9/api/stream".into();

    let (relay, shutdown) = start_relay_with(config).await;

    let res = client()
        .get(format!(
            "http://{relay}/sources?anilist_id=1&title=test&episode=1"
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("error").is_some());

    shutdown.trigger();
}

#[tokio::test]
async fn test_cors_preflight_allows_range() {
    let (relay, shutdown) = start_relay_with(RelayConfig::default()).await;

    let res = client()
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{relay}/proxy?url=http://example.com/v.mp4"),
        )
        .header("Origin", "https://player.example.org")
        .header("Access-Control-Request-Method", "GET")
        .header("Access-Control-Request-Headers", "range")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert!(res
        .headers()
        .get("access-control-allow-origin")
        .is_some());

    shutdown.trigger();
}
