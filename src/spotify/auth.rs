use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{StatusCode, header::AUTHORIZATION};

use super::SpotifyClient;
use crate::{config::ClientCredentials, error::AuthError, types::TokenResponse};

impl SpotifyClient {
    /// Exchanges the client id and secret for an app access token.
    ///
    /// Implements the OAuth 2.0 client-credentials grant: a form-encoded
    /// `grant_type=client_credentials` POST to the token endpoint, with the
    /// credentials in a `Basic` authorization header. No end user is involved,
    /// so the token can only read public catalog data.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Transport`] when the request cannot be sent or the body
    ///   cannot be read
    /// - [`AuthError::Status`] for any answer other than 200
    /// - [`AuthError::Decode`] when the body lacks `access_token`,
    ///   `token_type` or `expires_in`
    pub async fn request_token(
        &self,
        credentials: &ClientCredentials,
    ) -> Result<TokenResponse, AuthError> {
        let response = self
            .http
            .post(self.token_url.clone())
            .header(AUTHORIZATION, basic_authorization(credentials))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AuthError::Status(status));
        }

        let body = response.bytes().await.map_err(AuthError::Transport)?;
        serde_json::from_slice(&body).map_err(AuthError::Decode)
    }
}

fn basic_authorization(credentials: &ClientCredentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(pair))
}
