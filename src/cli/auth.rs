use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;

use crate::{config, error, info, server::start_api_server, spotify::SpotifyClient, success, warning};

const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the interactive authorization flow.
///
/// Starts the callback server on `SERVER_ADDRESS`, opens the authorization
/// URL in the default browser and waits up to a minute for the callback to
/// install a token. If a usable token is already held nothing happens.
///
/// # Flow
///
/// 1. **Server Start**: the `/callback` route shares `client` and calls
///    `save_token` with the code it receives
/// 2. **Browser Launch**: falls back to printing the URL
/// 3. **Wait**: polls the client once a second until it holds a token
pub async fn auth(client: Arc<SpotifyClient>) {
    let url = match client.authorize().await {
        Ok(Some(url)) => url,
        Ok(None) => {
            success!("Already authorized. Run `spotclean logout` to switch accounts.");
            return;
        }
        Err(e) => error!("Cannot build authorization URL. Err: {}", e),
    };

    let server_client = Arc::clone(&client);
    let addr = config::server_addr();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_client, &addr).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }

    if wait_for_token(&client).await {
        success!("Authentication successful!");
    } else {
        error!("Authentication failed or timed out.");
    }
}

async fn wait_for_token(client: &SpotifyClient) -> bool {
    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        if client.has_token().await {
            return true;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    false
}

pub async fn logout(client: &SpotifyClient) {
    if !client.has_token().await {
        info!("Not authorized.");
        return;
    }

    match client.deauthorize().await {
        Ok(()) => success!("Token removed."),
        Err(e) => error!("Cannot remove token. Err: {}", e),
    }
}

pub async fn status(client: &SpotifyClient) {
    let Some(token) = client.token().await else {
        warning!("Not authorized. Run `spotclean auth`.");
        return;
    };

    if !token.is_valid() {
        warning!("Stored token is incomplete. Run `spotclean auth`.");
        return;
    }

    let now = Utc::now().timestamp();
    if token.is_expired_at(now) {
        info!("Token expired; it will be refreshed on the next request.");
    } else {
        success!(
            "Authorized ({}), access valid for {}s.",
            token.token_type,
            token.remaining_at(now)
        );
    }
    info!("Token file: {}", client.store().path().display());
}
