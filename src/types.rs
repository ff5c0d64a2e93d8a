use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tabled::Tabled;

/// A bearer credential as held by the token cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// Builds a credential from a token endpoint response received at `now`.
    ///
    /// An `expires_in` that does not fit a timestamp yields an already
    /// expired credential.
    pub fn from_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        let expires_at = Duration::try_seconds(response.expires_in)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(now);

        Self {
            access_token: response.access_token,
            token_type: response.token_type,
            expires_at,
        }
    }

    /// True while `now` is before the expiry minus `margin`.
    pub fn is_fresh(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        self.expires_at
            .checked_sub_signed(margin)
            .is_some_and(|stale_at| now < stale_at)
    }

    /// Value for the `Authorization` header of catalog requests.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

/// Body of a successful client-credentials exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Scheme for the `Authorization` header, `Bearer` in practice.
    pub token_type: String,
    /// Lifetime of the token in seconds.
    pub expires_in: i64,
}

/// Reads an explicit `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a list that may itself be `null` or contain `null` entries,
/// dropping the `null`s.
fn skip_null_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let entries = Option::<Vec<Option<T>>>::deserialize(deserializer)?;
    Ok(entries.into_iter().flatten().flatten().collect())
}

/// Projection of the `GET /search?type=track` response.
///
/// Only the fields the browser client renders are kept. Spotify omits or
/// nulls fields freely (and puts `null` entries into `items`), so every field
/// falls back to its default instead of failing the whole response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackPage {
    #[serde(default, deserialize_with = "skip_null_entries")]
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_ms: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album: Album,
    #[serde(default, deserialize_with = "skip_null_entries")]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "skip_null_entries")]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

/// Track object returned by `GET /tracks/{id}`, passed through untouched.
pub type TrackDetails = Map<String, Value>;

/// One line of the `search` command's output table.
#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
    pub id: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        let secs = track.duration_ms / 1000;
        Self {
            name: track.name.clone(),
            artists: track
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            album: track.album.name.clone(),
            duration: format!("{}:{:02}", secs / 60, secs % 60),
            id: track.id.clone(),
        }
    }
}
