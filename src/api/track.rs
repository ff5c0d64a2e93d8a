use axum::{
    Json,
    extract::{Path, State},
};

use super::AppState;
use crate::{error::Error, types::TrackDetails};

const MISSING_ID: &str = "track ID is required";

/// `GET /api/track/{id}`
///
/// Like search, the id is only trimmed to decide whether it is blank and is
/// otherwise forwarded unchanged.
pub async fn track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TrackDetails>, Error> {
    if id.trim().is_empty() {
        return Err(Error::Validation(MISSING_ID));
    }

    let credential = state.tokens.ensure_token().await?;
    let details = state.spotify.get_track(&credential, &id).await?;

    Ok(Json(details))
}

/// Answers `/api/track` and `/api/track/`, where no id was given.
pub async fn missing_track_id() -> Error {
    Error::Validation(MISSING_ID)
}
