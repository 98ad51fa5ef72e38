//! Spotify Web API client with token lifecycle management.
//!
//! The library wraps the Web API behind [`spotify::SpotifyClient`], which
//! holds the user's token, refreshes it when it expires and persists it
//! through a [`management::CredentialStore`]. The binary built on top of it
//! adds interactive authorization and a helper that copies a playlist
//! without its explicit tracks.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types for every fallible operation
//! - `management` - Token value and credential stores
//! - `server` - Local HTTP server for authorization callbacks
//! - `spotify` - Web API client, request building and decoding
//! - `types` - Wire data structures and table rows
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotclean::{config, spotify::SpotifyClient, types::Track};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::from_env().await?;
//!     let tracks: Vec<Track> = client.find("Yellow").await?;
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
pub mod utils;

/// Prints `[o] <message>` with a blue bullet.
///
/// Console output for the binary; library code logs through `tracing`.
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints `[✓] <message>` with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints `[!] <message>` in red and exits with status 1.
///
/// Only for failures the command cannot recover from; code after it does not
/// run, so it can stand in any expression position.
///
/// ```
/// let client = match SpotifyClient::from_env().await {
///     Ok(client) => client,
///     Err(e) => error!("Cannot configure client. Err: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints `[!] <message>` in yellow for problems that do not stop the command.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
