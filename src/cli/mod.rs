//! # CLI Module
//!
//! Command-line diagnostics for the proxy. Each command builds the same
//! [`SpotifyClient`](crate::spotify::SpotifyClient) and
//! [`TokenManager`](crate::management::TokenManager) the server uses, so a
//! working `spotproxy search` means the configured credential and endpoints
//! are good before the server is ever started.
//!
//! ## Commands
//!
//! - [`search`] - Runs one track search and prints the results as a table
//! - [`track`] - Fetches one track and pretty-prints its JSON
//! - [`token`] - Performs a client-credentials exchange and prints its expiry
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotproxy token                   # Check the credential works
//! spotproxy search "Imagine"        # Query the catalog
//! spotproxy track 7pKfPomDEeI4TPT6EOYjn9
//! spotproxy serve --port 3000       # Start the proxy
//! ```
//!
//! Failures print a red message and exit with status 1 via
//! [`error!`](crate::error!).

mod search;
mod token;
mod track;

pub use search::search;
pub use token::token;
pub use track::track;

use crate::{api::AppState, config::Config, server};

fn state_or_exit(config: &Config) -> AppState {
    match server::build_state(config) {
        Ok(state) => state,
        Err(e) => crate::error!("Invalid configuration. Err: {}", e),
    }
}
