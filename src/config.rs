//! Configuration management for the Spotify track proxy.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage the
//! Spotify client credential, the upstream endpoints, and the listen address.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` file in the local data directory
//! 4. An explicit settings file passed on the command line
//! 5. Application defaults (where applicable)
//!
//! `dotenv` never overrides a variable that is already set, so whichever source
//! is loaded first wins.

use std::{
    env,
    fmt,
    net::{IpAddr, SocketAddr},
    path::{Path, PathBuf},
};

use crate::error::ConfigError;

/// Port used when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
const ENV_PORT: &str = "PORT";
const ENV_HOST: &str = "SERVER_HOST";
const ENV_API_URL: &str = "SPOTIFY_API_URL";
const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";

/// Outcome of [`load_env`], kept so it can be logged once tracing is up.
///
/// `load_env` runs before the tracing subscriber is installed, because the
/// subscriber's filter reads `RUST_LOG`, which may itself come from a `.env`
/// file. Anything logged inside `load_env` would be lost.
#[derive(Debug, Default)]
pub struct EnvSources {
    /// Files that were read, in load order.
    pub loaded: Vec<PathBuf>,
    /// Files that exist or were requested but could not be read.
    pub failed: Vec<(PathBuf, String)>,
}

impl EnvSources {
    /// Reports the outcome through `tracing`.
    pub fn log(&self) {
        for path in &self.loaded {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        for (path, reason) in &self.failed {
            tracing::warn!("Failed to load {}: {}", path.display(), reason);
        }
        if self.loaded.is_empty() {
            tracing::info!("Error loading .env file, using environment variables");
        }
    }
}

/// Loads environment variables from the available `.env` files.
///
/// Looks for `.env` in the working directory, then for `spotproxy/.env` in
/// the platform-specific local data directory, then for `extra` when given.
/// A missing or unreadable file is not an error: the proxy falls back to the
/// process environment. Call [`EnvSources::log`] on the result once logging
/// is initialised.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotproxy/.env`
/// - macOS: `~/Library/Application Support/spotproxy/.env`
/// - Windows: `%LOCALAPPDATA%/spotproxy/.env`
pub fn load_env(extra: Option<&Path>) -> EnvSources {
    let mut sources = EnvSources::default();

    // a missing ./.env is the common case and not worth reporting
    if let Ok(path) = dotenv::dotenv() {
        sources.loaded.push(path);
    }

    let data_env = settings_path();
    if data_env.is_file() {
        load_file(&data_env, &mut sources);
    }

    if let Some(path) = extra {
        load_file(path, &mut sources);
    }

    sources
}

fn load_file(path: &Path, sources: &mut EnvSources) {
    match dotenv::from_path(path) {
        Ok(()) => sources.loaded.push(path.to_path_buf()),
        Err(e) => sources.failed.push((path.to_path_buf(), e.to_string())),
    }
}

/// Returns the path of the settings file in the local data directory.
pub fn settings_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotproxy/.env");
    path
}

/// The server-held client id and secret used for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// `SPOTIFY_CLIENT_ID`
    pub client_id: String,
    /// `SPOTIFY_CLIENT_SECRET`, never logged
    pub client_secret: String,
}

impl ClientCredentials {
    /// Builds a credential pair, rejecting empty values.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Option<Self> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.is_empty() || client_secret.is_empty() {
            return None;
        }

        Some(Self {
            client_id,
            client_secret,
        })
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Runtime configuration of the proxy.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` when either half of the pair is unset. The server still starts;
    /// every token exchange then fails with an auth error.
    pub credentials: Option<ClientCredentials>,
    /// Address to bind, `SERVER_HOST`.
    pub host: IpAddr,
    /// Port to listen on, `PORT`.
    pub port: u16,
    /// Web API base, `SPOTIFY_API_URL`, without a trailing slash.
    pub api_url: String,
    /// Token endpoint, `SPOTIFY_API_TOKEN_URL`.
    pub token_url: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = match (get(ENV_CLIENT_ID), get(ENV_CLIENT_SECRET)) {
            (Some(id), Some(secret)) => ClientCredentials::new(id, secret),
            _ => None,
        };

        let port = match get(ENV_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let host = match get(ENV_HOST) {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| ConfigError::InvalidHost(raw))?,
            None => DEFAULT_HOST
                .parse()
                .map_err(|_| ConfigError::InvalidHost(DEFAULT_HOST.to_string()))?,
        };

        Ok(Self {
            credentials,
            host,
            port,
            api_url: trim_url(get(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.into())),
            token_url: get(ENV_TOKEN_URL).unwrap_or_else(|| DEFAULT_TOKEN_URL.into()),
        })
    }

    /// Returns the socket address the server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
