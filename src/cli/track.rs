use super::state_or_exit;
use crate::{config::Config, error};

/// Prints the details of one track as pretty JSON.
pub async fn track(config: &Config, id: String) {
    let id = id.trim();
    if id.is_empty() {
        error!("track ID is required");
    }

    let state = state_or_exit(config);

    let credential = match state.tokens.ensure_token().await {
        Ok(c) => c,
        Err(e) => error!("Failed to authenticate with Spotify. Err: {}", e),
    };

    let details = match state.spotify.get_track(&credential, id).await {
        Ok(d) => d,
        Err(e) => error!("Failed to get track {}. Err: {}", id, e),
    };

    match serde_json::to_string_pretty(&details) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Cannot print track. Err: {}", e),
    }
}
