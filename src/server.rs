use std::{io, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};

use crate::{api, spotify::SpotifyClient};

/// Builds the callback router: `/health` and `/callback`, sharing `client`.
pub fn router(client: Arc<SpotifyClient>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(client)))
}

/// Serves the callback router on `addr` until the task is dropped.
pub async fn start_api_server(client: Arc<SpotifyClient>, addr: &str) -> io::Result<()> {
    let addr = SocketAddr::from_str(addr).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid server address {}: {}", addr, e),
        )
    })?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Callback server listening on {}", addr);
    axum::serve(listener, router(client)).await
}
