use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;

use spotproxy::config::Config;
use spotproxy::server::{build_state, create_router};

const TOKEN_BODY: &str = r#"{"access_token":"test-token","token_type":"Bearer","expires_in":3600}"#;

// Helper to create a router pointed at the mock Spotify server
fn test_router(server: &MockServer, with_credentials: bool) -> Router {
    router_with_api_url(server, with_credentials, server.url("/v1"))
}

// Helper to create a router whose catalog calls go to `api_url`
fn router_with_api_url(server: &MockServer, with_credentials: bool, api_url: String) -> Router {
    let token_url = server.url("/api/token");
    let config = Config::from_lookup(|key| match key {
        "SPOTIFY_CLIENT_ID" if with_credentials => Some("client".to_string()),
        "SPOTIFY_CLIENT_SECRET" if with_credentials => Some("secret".to_string()),
        "SPOTIFY_API_URL" => Some(api_url.clone()),
        "SPOTIFY_API_TOKEN_URL" => Some(token_url.clone()),
        _ => None,
    })
    .unwrap();

    create_router(build_state(&config).unwrap())
}

async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/token");
            then.status(200)
                .header("content-type", "application/json")
                .body(TOKEN_BODY);
        })
        .await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start_async().await;
    let (status, body) = get(test_router(&server, true), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["token_cached"], false);
    assert!(body["token_expires_at"].is_null());
}

#[tokio::test]
async fn test_health_reports_cached_token() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(200).json_body(json!({"tracks": {"items": []}}));
        })
        .await;

    let app = test_router(&server, true);
    let (status, _) = get(app.clone(), "/api/search?q=anything").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_cached"], true);
    assert!(body["token_expires_at"].is_string());
    token.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_search_missing_query_is_bad_request() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;

    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20", "/api/search?limit=5"] {
        let (status, body) = get(test_router(&server, true), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body, json!({"error": "query parameter 'q' is required"}));
    }

    token.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_track_missing_id_is_bad_request() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;

    for uri in ["/api/track", "/api/track/", "/api/track/%20"] {
        let (status, body) = get(test_router(&server, true), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(body, json!({"error": "track ID is required"}));
    }

    token.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_search_returns_tracks() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/search")
                .query_param("q", "Imagine")
                .query_param("type", "track")
                .query_param("limit", "10")
                .header("authorization", "Bearer test-token");
            then.status(200).json_body(json!({
                "tracks": {
                    "href": "https://api.spotify.com/v1/search?query=Imagine",
                    "items": [{
                        "name": "Imagine",
                        "id": "7pKfPomDEeI4TPT6EOYjn9",
                        "duration_ms": 183906,
                        "popularity": 80,
                        "album": {
                            "name": "Imagine",
                            "images": [{"url": "https://i.scdn.co/image/abc", "height": 640}]
                        },
                        "artists": [{"name": "John Lennon", "id": "4x1nvY2FN8jxqAFA0DA02H"}],
                        "preview_url": null
                    }]
                }
            }));
        })
        .await;

    let (status, body) = get(test_router(&server, true), "/api/search?q=Imagine").await;

    assert_eq!(status, StatusCode::OK);
    let items = body["tracks"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Imagine");
    assert_eq!(items[0]["duration_ms"], 183906);
    assert_eq!(items[0]["album"]["images"][0]["url"], "https://i.scdn.co/image/abc");
    assert_eq!(items[0]["artists"][0]["name"], "John Lennon");
    // fields outside the projection are dropped
    assert!(items[0].get("popularity").is_none());

    token.assert_calls_async(1).await;
    search.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_token_is_reused_across_requests() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(200).json_body(json!({"tracks": {"items": []}}));
        })
        .await;

    let app = test_router(&server, true);
    for _ in 0..3 {
        let (status, _) = get(app.clone(), "/api/search?q=anything").await;
        assert_eq!(status, StatusCode::OK);
    }

    token.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_search_passes_through_rate_limit() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(429).header("retry-after", "30");
        })
        .await;

    let (status, body) = get(test_router(&server, true), "/api/search?q=Imagine").await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body, json!({"error": "Spotify API error"}));
}

#[tokio::test]
async fn test_search_malformed_json_is_server_error() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(200).body("{\"tracks\": [");
        })
        .await;

    let (status, body) = get(test_router(&server, true), "/api/search?q=Imagine").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to parse response"}));
}

#[tokio::test]
async fn test_track_passes_through_details() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    let track = json!({
        "id": "abc123",
        "name": "Imagine",
        "popularity": 80,
        "explicit": false,
        "external_urls": {"spotify": "https://open.spotify.com/track/abc123"}
    });
    let body = track.clone();
    server
        .mock_async(move |when, then| {
            when.method(GET)
                .path("/v1/tracks/abc123")
                .header("authorization", "Bearer test-token");
            then.status(200).json_body(body);
        })
        .await;

    let (status, body) = get(test_router(&server, true), "/api/track/abc123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, track);
}

#[tokio::test]
async fn test_track_not_found_is_passed_through() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/tracks/abc123");
            then.status(404)
                .json_body(json!({"error": {"status": 404, "message": "Not found"}}));
        })
        .await;

    let (status, body) = get(test_router(&server, true), "/api/track/abc123").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Spotify API error"}));
}

#[tokio::test]
async fn test_track_non_object_is_parse_error() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/tracks/abc123");
            then.status(200).json_body(json!(["not", "an", "object"]));
        })
        .await;

    let (status, body) = get(test_router(&server, true), "/api/track/abc123").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to parse response"}));
}

#[tokio::test]
async fn test_auth_failure_is_server_error() {
    let server = MockServer::start_async().await;
    let token = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/token");
            then.status(400).json_body(json!({"error": "invalid_client"}));
        })
        .await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(200).json_body(json!({"tracks": {"items": []}}));
        })
        .await;

    let (status, body) = get(test_router(&server, true), "/api/search?q=Imagine").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to authenticate with Spotify"}));
    token.assert_calls_async(1).await;
    search.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_missing_credentials_is_server_error() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;

    let (status, body) = get(test_router(&server, false), "/api/track/abc123").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to authenticate with Spotify"}));
    token.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_search_tolerates_null_fields() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/search");
            then.status(200).json_body(json!({
                "tracks": {
                    "items": [
                        null,
                        {
                            "name": null,
                            "id": "abc123",
                            "duration_ms": 1000,
                            "album": {"name": "A", "images": null},
                            "artists": [{"name": "B", "id": "b1"}],
                            "preview_url": null
                        }
                    ]
                }
            }));
        })
        .await;

    let (status, body) = get(test_router(&server, true), "/api/search?q=Imagine").await;

    assert_eq!(status, StatusCode::OK);
    let items = body["tracks"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "abc123");
    assert_eq!(items[0]["name"], "");
    assert_eq!(items[0]["album"]["images"], json!([]));
}

#[tokio::test]
async fn test_search_forwards_query_unchanged() {
    let server = MockServer::start_async().await;
    mock_token(&server).await;
    let search = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/search")
                .query_param("q", " Imagine ");
            then.status(200).json_body(json!({"tracks": {"items": []}}));
        })
        .await;

    let (status, _) = get(test_router(&server, true), "/api/search?q=%20Imagine%20").await;

    assert_eq!(status, StatusCode::OK);
    search.assert_calls_async(1).await;
}

// Nothing listens on port 1, so catalog requests fail to connect
const UNREACHABLE_API: &str = "http://127.0.0.1:1/v1";

#[tokio::test]
async fn test_search_transport_failure_is_server_error() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;
    let app = router_with_api_url(&server, true, UNREACHABLE_API.to_string());

    let (status, body) = get(app, "/api/search?q=Imagine").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to search tracks"}));
    token.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_track_transport_failure_is_server_error() {
    let server = MockServer::start_async().await;
    let token = mock_token(&server).await;
    let app = router_with_api_url(&server, true, UNREACHABLE_API.to_string());

    let (status, body) = get(app, "/api/track/abc123").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to get track details"}));
    token.assert_calls_async(1).await;
}
