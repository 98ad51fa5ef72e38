//! Error types shared by the client, the token store and the configuration layer.
//!
//! Every fallible library operation reports through [`ApiError`]. The variants keep
//! transport failures, non-2xx responses, decode failures and credential problems
//! apart so callers (and logs) can tell them from one another.

use thiserror::Error;

/// The single failure type returned by every client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network, DNS or TLS failure reported by the transport.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} for {url}: {body}")]
    Http {
        status: u16,
        url: String,
        body: String,
    },

    #[error("decode failure: {0}")]
    Decode(#[from] DecodeError),

    #[error("credential failure: {0}")]
    Credential(#[from] CredentialError),

    /// The token could not be written to (or removed from) durable storage.
    #[error("credential store failure: {0}")]
    Store(#[from] StoreError),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Failure reported by an [`HttpTransport`](crate::spotify::HttpTransport).
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed or unexpected JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object")]
    NotAnObject,

    #[error("missing envelope key `{0}`")]
    MissingEnvelope(&'static str),

    #[error("empty response where a value was expected")]
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("no token held, authorize first")]
    NoToken,

    #[error("held token is incomplete")]
    InvalidToken,

    /// Carries the cause of the failed attempt.
    #[error("token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("redirect did not carry an authorization code")]
    MissingCode,

    #[error("authorization denied: {0}")]
    AuthorizationDenied(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("cannot load environment file: {0}")]
    Env(String),
}
