use tabled::Table;

use super::state_or_exit;
use crate::{config::Config, error, info, success, types::TrackTableRow, warning};

/// Runs a track search and prints the results as a table.
pub async fn search(config: &Config, query: String) {
    let state = state_or_exit(config);

    let credential = match state.tokens.ensure_token().await {
        Ok(c) => c,
        Err(e) => error!("Failed to authenticate with Spotify. Err: {}", e),
    };

    info!("Searching tracks for \"{}\"...", query);
    let result = match state.spotify.search_tracks(&credential, &query).await {
        Ok(r) => r,
        Err(e) => error!("Search failed. Err: {}", e),
    };

    if result.tracks.items.is_empty() {
        warning!("No tracks found.");
        return;
    }

    let rows: Vec<TrackTableRow> = result.tracks.items.iter().map(TrackTableRow::from).collect();
    success!("Found {} tracks", rows.len());
    println!("{}", Table::new(rows));
}
