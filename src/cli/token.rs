use chrono::Utc;

use super::state_or_exit;
use crate::{config::Config, error, info, success};

/// Requests an access token and prints its type and expiry.
pub async fn token(config: &Config) {
    let state = state_or_exit(config);

    if !state.tokens.has_credentials() {
        error!("SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set");
    }

    let credential = match state.tokens.ensure_token().await {
        Ok(c) => c,
        Err(e) => error!("Failed to authenticate with Spotify. Err: {}", e),
    };

    let remaining = credential.expires_at - Utc::now();
    success!("Authentication successful!");
    info!("Token type: {}", credential.token_type);
    info!(
        "Expires at {} (in {} minutes)",
        credential.expires_at.format("%Y-%m-%d %H:%M:%S UTC"),
        remaining.num_minutes()
    );
}
