//! # Spotify Web API client
//!
//! Everything that talks to the service lives here. The layering is:
//!
//! ```text
//! SpotifyClient (token lifecycle, typed operations)
//!          ↓
//! request  (pure mapping: operation -> method, URL, params, headers)
//!          ↓
//! HttpTransport (one request in, one status + body out)
//!          ↓
//! decode   (strict body -> typed result)
//! ```
//!
//! ## Token lifecycle
//!
//! [`SpotifyClient`] holds at most one token. Authenticated operations check
//! it before sending anything:
//!
//! - no token: fail with `NoToken`, nothing is sent
//! - expired token: refresh once, then send; concurrent callers share the
//!   same refresh
//! - valid token: send with `Authorization: Bearer <access>`
//!
//! ## Operations
//!
//! Operations are split by concern, each adding methods to the client:
//!
//! - [`auth`] - authorization URL, code exchange, deauthorization
//! - [`search`] - fetch by id, prefix search, profile, clean-version lookup
//! - [`library`] - saved items, save, remove, contains
//! - [`playlist`] - list, create, add tracks, read tracks
//! - [`clean`] - copy a playlist without explicit tracks
//!
//! ## Authorities
//!
//! Resource calls go to `endpoints.api`, authorization calls to
//! `endpoints.accounts`. Both are configurable so tests and proxies can
//! point the client elsewhere.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = SpotifyClient::from_env().await?;
//! let tracks: Vec<Track> = client.find("Yellow").await?;
//! let me = client.my_profile().await?;
//! ```

pub mod auth;
pub mod clean;
mod client;
pub mod decode;
mod items;
pub mod library;
pub mod playlist;
pub mod request;
pub mod search;
mod transport;

pub use clean::CleanReport;
pub use client::SpotifyClient;
pub use items::{ItemKind, LibraryItem, SearchItem, SpotifyItem};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
