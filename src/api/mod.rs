//! # API Module
//!
//! HTTP endpoints served by the local callback server during `spotclean auth`.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization redirect. Reads `code` (or
//!   `error`) from the query and hands the code to
//!   [`SpotifyClient::save_token`](crate::spotify::SpotifyClient::save_token),
//!   which exchanges and persists it.
//! - [`health`] - Returns status and version, handy to check the server is up
//!   before opening the browser.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use spotclean::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
