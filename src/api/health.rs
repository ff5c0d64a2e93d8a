use axum::{extract::State, response::Json};
use serde_json::{Value, json};

use super::AppState;

/// `GET /health`
///
/// Reports the crate version and whether an access token is currently
/// cached. Never triggers a token exchange.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let token = state.tokens.current().await;

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "token_cached": token.is_some(),
        "token_expires_at": token.map(|t| t.expires_at.to_rfc3339()),
    }))
}
