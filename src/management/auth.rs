use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::{
    config::ClientCredentials,
    error::AuthError,
    spotify::SpotifyClient,
    types::Credential,
};

/// Seconds before the real expiry at which a token is treated as stale.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Source of the current time for expiry checks.
pub trait Clock: Send + Sync {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used everywhere outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Process-wide cache of the app access token.
///
/// The cached credential sits behind an async mutex that is held across a
/// refresh. Callers that find the token stale while another caller is already
/// exchanging credentials wait for that exchange and then reuse its result,
/// so one expiry window costs exactly one round-trip to the accounts service.
pub struct TokenManager {
    client: SpotifyClient,
    credentials: Option<ClientCredentials>,
    clock: Arc<dyn Clock>,
    margin: Duration,
    token: Mutex<Option<Credential>>,
}

impl TokenManager {
    /// Creates an empty cache that exchanges `credentials` through `client`.
    ///
    /// `credentials` may be `None`; every [`ensure_token`](Self::ensure_token)
    /// call then fails with [`AuthError::MissingCredentials`].
    pub fn new(client: SpotifyClient, credentials: Option<ClientCredentials>) -> Self {
        Self::with_clock(client, credentials, Arc::new(SystemClock))
    }

    /// Like [`new`](Self::new), but reads the time from `clock`.
    pub fn with_clock(
        client: SpotifyClient,
        credentials: Option<ClientCredentials>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        TokenManager {
            client,
            credentials,
            clock,
            margin: Duration::seconds(EXPIRY_MARGIN_SECS),
            token: Mutex::new(None),
        }
    }

    /// Returns a credential valid for at least the expiry margin.
    ///
    /// Reuses the cached credential while it is fresh. Otherwise performs a
    /// client-credentials exchange and stores the result. A failed exchange
    /// leaves the cache as it was, including a stale credential.
    pub async fn ensure_token(&self) -> Result<Credential, AuthError> {
        let mut token = self.token.lock().await;

        if let Some(current) = token.as_ref() {
            if current.is_fresh(self.clock.now(), self.margin) {
                return Ok(current.clone());
            }
        }

        let credentials = self
            .credentials
            .as_ref()
            .ok_or(AuthError::MissingCredentials)?;

        tracing::debug!("Requesting new Spotify access token");
        let response = self.client.request_token(credentials).await?;
        let fresh = Credential::from_response(response, self.clock.now());
        tracing::info!("Spotify access token refreshed, expires at {}", fresh.expires_at);

        *token = Some(fresh.clone());
        Ok(fresh)
    }

    /// Returns the cached credential without refreshing it.
    pub async fn current(&self) -> Option<Credential> {
        self.token.lock().await.clone()
    }

    /// Whether a client id and secret were configured.
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}
