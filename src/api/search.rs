use std::collections::HashMap;

use axum::{
    Json,
    extract::{Query, State},
};

use super::AppState;
use crate::{error::Error, types::SearchResult};

/// `GET /api/search?q=...`
///
/// A blank `q` is rejected, but a non-blank one is forwarded to Spotify
/// exactly as received, surrounding whitespace included.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SearchResult>, Error> {
    let query = params
        .get("q")
        .filter(|q| !q.trim().is_empty())
        .ok_or(Error::Validation("query parameter 'q' is required"))?;

    let credential = state.tokens.ensure_token().await?;
    let result = state.spotify.search_tracks(&credential, query).await?;

    tracing::debug!(query, found = result.tracks.items.len(), "Track search");
    Ok(Json(result))
}
