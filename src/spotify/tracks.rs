use reqwest::header::AUTHORIZATION;

use super::{SpotifyClient, read_json};
use crate::{
    error::Error,
    types::{Credential, SearchResult, TrackDetails},
};

/// Number of tracks a search returns.
pub const SEARCH_LIMIT: u32 = 10;

impl SpotifyClient {
    /// Searches the catalog for tracks matching `query`.
    ///
    /// Calls `GET /search` with `type=track` and a fixed page size of
    /// [`SEARCH_LIMIT`]. The response is narrowed to the fields the browser
    /// client renders (name, id, duration, album name and images, artists,
    /// preview URL).
    pub async fn search_tracks(
        &self,
        credential: &Credential,
        query: &str,
    ) -> Result<SearchResult, Error> {
        const FAILED: &str = "Failed to search tracks";

        let limit = SEARCH_LIMIT.to_string();
        let response = self
            .http
            .get(self.endpoint(&["search"]))
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
            .header(AUTHORIZATION, credential.authorization())
            .send()
            .await
            .map_err(|source| Error::Request {
                message: FAILED,
                source,
            })?;

        read_json(response, FAILED).await
    }

    /// Fetches the full track object for `id`.
    ///
    /// The object is returned as-is; only its top level is checked to be a
    /// JSON object.
    pub async fn get_track(&self, credential: &Credential, id: &str) -> Result<TrackDetails, Error> {
        const FAILED: &str = "Failed to get track details";

        let response = self
            .http
            .get(self.endpoint(&["tracks", id]))
            .header(AUTHORIZATION, credential.authorization())
            .send()
            .await
            .map_err(|source| Error::Request {
                message: FAILED,
                source,
            })?;

        read_json(response, FAILED).await
    }
}
