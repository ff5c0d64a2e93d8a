//! # API Module
//!
//! HTTP handlers of the proxy. Each handler validates its input, obtains a
//! bearer credential from the shared [`TokenManager`], forwards the call to
//! Spotify through [`SpotifyClient`], and returns either the upstream payload
//! or an [`Error`](crate::error::Error) rendered as `{"error": "..."}`.
//!
//! ## Endpoints
//!
//! - [`search`] - `GET /api/search?q=...`, first page of matching tracks
//! - [`track`] - `GET /api/track/{id}`, the full track object passed through
//! - [`missing_track_id`] - `GET /api/track` without an id, always 400
//! - [`health`] - `GET /health`, status and version for monitoring
//!
//! ## Error Mapping
//!
//! | Failure | Status | Body |
//! |---|---|---|
//! | missing `q` / id | 400 | `query parameter 'q' is required` / `track ID is required` |
//! | token exchange | 500 | `Failed to authenticate with Spotify` |
//! | Spotify non-200 | same as upstream | `Spotify API error` |
//! | malformed JSON | 500 | `Failed to parse response` |
//! | transport | 500 | `Failed to search tracks` / `Failed to get track details` |

mod health;
mod search;
mod track;

use std::sync::Arc;

pub use health::health;
pub use search::search;
pub use track::{missing_track_id, track};

use crate::{management::TokenManager, spotify::SpotifyClient};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Access token cache shared by all requests.
    pub tokens: Arc<TokenManager>,
    /// Client for the catalog endpoints.
    pub spotify: SpotifyClient,
}

impl AppState {
    /// Bundles the token cache and the client into handler state.
    pub fn new(tokens: Arc<TokenManager>, spotify: SpotifyClient) -> Self {
        Self { tokens, spotify }
    }
}
