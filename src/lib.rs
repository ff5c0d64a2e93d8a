//! Spotify Track Proxy Library
//!
//! This library provides a small backend proxy in front of the Spotify Web API.
//! Browser clients call two endpoints (track search and track details) and the
//! proxy forwards them upstream with a server-held client credential, so the
//! client secret never leaves the server.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the proxy endpoints
//! - `cli` - Command-line diagnostics driving the same client and token cache
//! - `config` - Configuration management and environment variables
//! - `error` - Error kinds and their HTTP mapping
//! - `management` - The shared access token cache
//! - `server` - Router assembly and the listening server
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use spotproxy::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotproxy::Res<()> {
//!     let sources = config::load_env(None);
//!     sources.log();
//!     let config = config::Config::from_env()?;
//!     server::start_api_server(config).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line entry points where any error simply ends the
/// command. Library code returns the typed errors from [`error`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Requesting access token...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Token expires at {}", expires_at);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for the command-line surface. The proxy server never exits on a
/// request failure.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Unlike `error!`, the program keeps running.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
