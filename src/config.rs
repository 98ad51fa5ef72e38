//! Configuration management for spotclean.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Real environment variables always win
//! over the file, since `dotenv` never overwrites a variable that is already
//! set.
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `SPOTIFY_API_AUTH_CLIENT_ID` | yes | |
//! | `SPOTIFY_API_AUTH_CLIENT_SECRET` | yes | |
//! | `SPOTIFY_API_REDIRECT_URI` | yes | |
//! | `SERVER_ADDRESS` | no | `127.0.0.1:8888` |
//! | `SPOTIFY_API_URL` | no | `https://api.spotify.com/v1/` |
//! | `SPOTIFY_ACCOUNTS_URL` | no | `https://accounts.spotify.com/` |

use std::{env, path::PathBuf};

use crate::{
    error::ConfigError,
    types::{DEFAULT_ACCOUNTS_URL, DEFAULT_API_URL, DeveloperApplication, Endpoints},
};

/// Directory name under the platform data directory.
pub const APP_DIR: &str = "spotclean";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";

/// Returns `<data_local_dir>/spotclean`, falling back to `./spotclean`.
pub fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Loads environment variables from the `.env` file in the local data directory.
///
/// Creates the application directory if it doesn't exist. A missing `.env`
/// file is not an error; variables may just as well come from the process
/// environment.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotclean/.env`
/// - macOS: `~/Library/Application Support/spotclean/.env`
/// - Windows: `%LOCALAPPDATA%/spotclean/.env`
///
/// # Errors
///
/// Returns [`ConfigError::Env`] if the directory cannot be created or the
/// file exists but cannot be parsed.
///
/// # Example
///
/// ```
/// use spotclean::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), ConfigError> {
    let dir = app_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| ConfigError::Env(e.to_string()))?;

    let path = dir.join(".env");
    if !path.is_file() {
        tracing::debug!("No environment file at {}", path.display());
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| ConfigError::Env(e.to_string()))?;
    Ok(())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the address the local callback server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to [`DEFAULT_SERVER_ADDRESS`]. The port
/// must match the one in `SPOTIFY_API_REDIRECT_URI`.
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the client id obtained when registering the application.
///
/// # Errors
///
/// [`ConfigError::Missing`] if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the client secret obtained when registering the application.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the redirect URI registered for the application.
///
/// Must match the registered value exactly, e.g. `http://127.0.0.1:8888/callback`.
pub fn spotify_redirect_uri() -> Result<String, ConfigError> {
    required("SPOTIFY_API_REDIRECT_URI")
}

pub fn spotify_api_url() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_accounts_url() -> String {
    optional("SPOTIFY_ACCOUNTS_URL", DEFAULT_ACCOUNTS_URL)
}

impl DeveloperApplication {
    /// Reads the three application credentials from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(DeveloperApplication::new(
            spotify_client_id()?,
            spotify_client_secret()?,
            spotify_redirect_uri()?,
        ))
    }
}

impl Endpoints {
    /// Reads both authority overrides, falling back to the public service.
    pub fn from_env() -> Self {
        Endpoints::new(spotify_api_url(), spotify_accounts_url())
    }
}
