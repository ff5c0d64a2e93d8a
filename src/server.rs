use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    Res, api,
    api::AppState,
    config::Config,
    error::ConfigError,
    management::TokenManager,
    spotify::SpotifyClient,
};

/// Wires the Spotify client and token cache described by `config`.
pub fn build_state(config: &Config) -> Result<AppState, ConfigError> {
    let spotify = SpotifyClient::new(config)?;
    let tokens = Arc::new(TokenManager::new(
        spotify.clone(),
        config.credentials.clone(),
    ));
    Ok(AppState::new(tokens, spotify))
}

/// Creates the router with all proxy routes.
///
/// # Routes
///
/// - `GET /health` - liveness and token cache status
/// - `GET /api/search?q=` - track search
/// - `GET /api/track/{id}` - track details
///
/// `/api/track` and `/api/track/` answer 400 since the id is missing.
/// Every route allows any origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/search", get(api::search))
        .route("/api/track", get(api::missing_track_id))
        .route("/api/track/", get(api::missing_track_id))
        .route("/api/track/{id}", get(api::track))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds to the configured address and serves the proxy until Ctrl+C.
///
/// Missing Spotify credentials only produce a warning; the server still
/// starts and answers every proxied request with an auth error.
///
/// # Errors
///
/// Returns an error if a base URL is unusable, the address cannot be bound,
/// or the server fails while running.
pub async fn start_api_server(config: Config) -> Res<()> {
    let state = build_state(&config)?;
    if !state.tokens.has_credentials() {
        tracing::warn!(
            "SPOTIFY_CLIENT_ID or SPOTIFY_CLIENT_SECRET is not set; every request will fail to authenticate"
        );
    }

    let app = create_router(state);
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
