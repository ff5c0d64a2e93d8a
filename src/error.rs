//! Error kinds raised by the proxy and their mapping to HTTP responses.
//!
//! Every request-path failure ends up as an [`Error`], which renders itself
//! as a JSON body of the form `{"error": "<message>"}`. No error is fatal to
//! the process; each request fails on its own.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error as ThisError;

/// Startup configuration problems.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    /// `PORT` is not a valid port number.
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
    /// `SERVER_HOST` is not an IP address.
    #[error("SERVER_HOST must be an IP address, got {0:?}")]
    InvalidHost(String),
    /// A Spotify base URL does not parse or cannot carry a path.
    #[error("{name} is not a usable base URL: {value:?}")]
    InvalidUrl { name: &'static str, value: String },
    /// The TLS backend failed to initialise.
    #[error("HTTP client could not be constructed")]
    HttpClient(#[source] reqwest::Error),
}

/// Failures of the client-credentials exchange.
#[derive(Debug, ThisError)]
pub enum AuthError {
    /// No client id and secret were configured.
    #[error("missing Spotify credentials")]
    MissingCredentials,
    /// The accounts service could not be reached.
    #[error("token request failed")]
    Transport(#[source] reqwest::Error),
    /// The accounts service answered with a non-200 status.
    #[error("failed to get token, status: {0}")]
    Status(StatusCode),
    /// The token body lacks a required field.
    #[error("token response could not be decoded")]
    Decode(#[source] serde_json::Error),
}

/// Canonical error of the request path.
#[derive(Debug, ThisError)]
pub enum Error {
    /// A required request parameter is missing or blank.
    #[error("{0}")]
    Validation(&'static str),
    /// No usable access token could be obtained.
    #[error("Failed to authenticate with Spotify")]
    Auth(#[from] AuthError),
    /// Spotify answered with a non-200 status.
    #[error("Spotify API error")]
    Upstream { status: StatusCode },
    /// Spotify answered 200 with a body that does not decode.
    #[error("Failed to parse response")]
    Parse(#[source] serde_json::Error),
    /// The request to Spotify could not be completed.
    #[error("{message}")]
    Request {
        message: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl Error {
    /// Returns the HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Upstream { status } => *status,
            Error::Auth(_) | Error::Parse(_) | Error::Request { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Error::Validation(_) => tracing::debug!("Rejected request: {}", self),
            Error::Auth(e) => tracing::warn!("Token exchange failed: {}", e),
            Error::Upstream { status } => tracing::warn!("Spotify returned {}", status),
            Error::Parse(e) => tracing::warn!("Failed to decode Spotify response: {}", e),
            Error::Request { source, .. } => tracing::warn!("{}: {}", self, source),
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
