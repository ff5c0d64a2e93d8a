//! # Spotify Integration Module
//!
//! This module is the upstream side of the proxy: a thin client for the parts
//! of the Spotify Web API the proxy forwards to. It owns the shared HTTP
//! connection pool and the two base URLs, and exposes three calls:
//!
//! - [`SpotifyClient::request_token`] - client-credentials exchange against the
//!   accounts service (`POST /api/token`)
//! - [`SpotifyClient::search_tracks`] - `GET /search?type=track&limit=10`
//! - [`SpotifyClient::get_track`] - `GET /tracks/{id}`
//!
//! ## Architecture
//!
//! ```text
//! HTTP Facade (api)
//!          ↓
//! Token Cache (management::TokenManager)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client credentials)
//!     └── Track Operations (search, lookup)
//!          ↓
//! HTTP Layer (reqwest)
//! ```
//!
//! ## Error Handling
//!
//! No call retries. A non-200 answer from a catalog endpoint is surfaced as
//! [`Error::Upstream`](crate::error::Error::Upstream) with the status intact,
//! so the facade can hand it straight back to the browser (a 429 stays a 429).
//! A 200 whose body does not decode is a
//! [`Error::Parse`](crate::error::Error::Parse).
//!
//! ## Thread Safety
//!
//! [`SpotifyClient`] is cheap to clone; clones share one `reqwest::Client`
//! and its connection pool.

pub mod auth;
pub mod tracks;

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{ConfigError, Error},
};

/// HTTP client for the Spotify accounts service and Web API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: Url,
    token_url: Url,
}

impl SpotifyClient {
    /// Builds a client for the endpoints named in `config`.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ConfigError::HttpClient)?;

        Self::with_http(http, &config.api_url, &config.token_url)
    }

    /// Builds a client on top of an existing `reqwest::Client`.
    pub fn with_http(http: Client, api_url: &str, token_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            http,
            api_url: parse_base("SPOTIFY_API_URL", api_url)?,
            token_url: parse_base("SPOTIFY_API_TOKEN_URL", token_url)?,
        })
    }

    /// Returns `{api_url}/{segments...}` with every segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // parse_base rejects cannot-be-a-base URLs, so this cannot fail
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_base(name: &'static str, value: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidUrl {
        name,
        value: value.to_string(),
    };

    let url = Url::parse(value.trim_end_matches('/')).map_err(|_| invalid())?;
    if url.cannot_be_a_base() {
        return Err(invalid());
    }
    Ok(url)
}

/// Decodes a catalog response, mapping non-200 statuses and bad bodies.
async fn read_json<T: DeserializeOwned>(
    response: Response,
    message: &'static str,
) -> Result<T, Error> {
    let status = response.status();
    if status != StatusCode::OK {
        return Err(Error::Upstream { status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| Error::Request { message, source })?;

    serde_json::from_slice(&body).map_err(Error::Parse)
}
