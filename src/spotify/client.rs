use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, RwLock};

use crate::{
    error::{ApiError, ConfigError, CredentialError},
    management::{CredentialStore, FileCredentialStore, Token},
    spotify::{
        HttpTransport, ReqwestTransport,
        request::{self, ApiRequest},
    },
    types::{DeveloperApplication, Endpoints},
};

/// Authenticated Web API client.
///
/// Owns the current [`Token`] and the developer application credentials, and
/// makes sure every authenticated call goes out with a valid, unexpired access
/// secret. The held token is in one of three states:
///
/// - **Absent**: authenticated calls fail with [`CredentialError::NoToken`]
///   before anything is sent.
/// - **Expired**: the first caller performs one refresh exchange; callers that
///   arrive while it is in flight wait for it and reuse its outcome.
/// - **Valid**: calls proceed immediately.
///
/// Token mutation (`save_token`, refresh, `deauthorize`) is serialized by a
/// single writer lock, so a later write can never be overwritten by an earlier
/// one that was still in flight. The lock also holds the cause of the last
/// failed refresh, which callers that waited on that attempt get back inside
/// [`CredentialError::RefreshFailed`]. Reads take a shared lock and never wait
/// on network I/O.
///
/// The client is meant to be created once and shared, usually behind an `Arc`.
pub struct SpotifyClient<T = ReqwestTransport, S = FileCredentialStore> {
    pub(super) app: DeveloperApplication,
    pub(super) endpoints: Endpoints,
    transport: T,
    pub(super) store: S,
    pub(super) token: RwLock<Option<Token>>,
    pub(super) writer: Mutex<Option<String>>,
    refresh_epoch: AtomicU64,
}

impl SpotifyClient {
    /// Builds a client from the environment, backed by reqwest and the token file.
    pub async fn from_env() -> Result<Self, ConfigError> {
        let app = DeveloperApplication::from_env()?;
        let endpoints = Endpoints::from_env();
        Ok(Self::with_endpoints(
            app,
            endpoints,
            ReqwestTransport::default(),
            FileCredentialStore::default(),
        )
        .await)
    }
}

impl<T: HttpTransport, S: CredentialStore> SpotifyClient<T, S> {
    /// Creates a client against the public service, restoring any stored token.
    pub async fn new(app: DeveloperApplication, transport: T, store: S) -> Self {
        Self::with_endpoints(app, Endpoints::default(), transport, store).await
    }

    pub async fn with_endpoints(
        app: DeveloperApplication,
        endpoints: Endpoints,
        transport: T,
        store: S,
    ) -> Self {
        let token = store.get().await;
        if token.is_some() {
            tracing::debug!("Restored token from credential store");
        }

        SpotifyClient {
            app,
            endpoints,
            transport,
            store,
            token: RwLock::new(token),
            writer: Mutex::new(None),
            refresh_epoch: AtomicU64::new(0),
        }
    }

    pub fn application(&self) -> &DeveloperApplication {
        &self.app
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// True when a token is held and all of its fields are populated.
    pub async fn has_token(&self) -> bool {
        let held = self.token.read().await;
        held.as_ref().is_some_and(Token::is_valid)
    }

    /// Snapshot of the held token.
    pub async fn token(&self) -> Option<Token> {
        self.token.read().await.clone()
    }

    /// Refreshes the held token unconditionally.
    ///
    /// On success the new access secret is already persisted when this returns,
    /// so further calls may go out straight away. On failure the held token is
    /// left as it was and may be refreshed again later.
    pub async fn refresh_token(&self) -> Result<(), ApiError> {
        let mut last_failure = self.writer.lock().await;
        self.refresh_locked(&mut last_failure).await.map(|_| ())
    }

    /// Sends `request`, the single way operations reach the transport.
    ///
    /// Requests marked `requires_auth` go out with a bearer header for a token
    /// that is refreshed first if needed. The others, such as the code
    /// exchange, are sent as built and never look at the held token.
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        if !request.requires_auth {
            return self.dispatch(&request).await;
        }
        let token = self.fresh_token().await?;
        self.dispatch(&request.authorized(&token)).await
    }

    /// Sends `request` as is; a non-2xx status becomes [`ApiError::Http`].
    async fn dispatch(&self, request: &ApiRequest) -> Result<Vec<u8>, ApiError> {
        tracing::debug!("{:?} {} {}", request.operation, request.method, request.url);

        let response = self.transport.request(request).await?;
        if !response.is_success() {
            let body = String::from_utf8_lossy(&response.body).into_owned();
            tracing::debug!("{} answered {}", request.url, response.status);
            return Err(ApiError::Http {
                status: response.status,
                url: request.url.clone(),
                body,
            });
        }

        Ok(response.body)
    }

    /// Returns a token that is safe to use right now.
    pub(crate) async fn fresh_token(&self) -> Result<Token, ApiError> {
        let seen_epoch = self.refresh_epoch.load(Ordering::Acquire);
        let held = self.token.read().await.clone();

        match held {
            None => Err(CredentialError::NoToken.into()),
            Some(token) if !token.is_valid() => Err(CredentialError::InvalidToken.into()),
            Some(token) if !token.is_expired() => Ok(token),
            Some(_) => self.refresh_coalesced(seen_epoch).await,
        }
    }

    async fn refresh_coalesced(&self, seen_epoch: u64) -> Result<Token, ApiError> {
        let mut last_failure = self.writer.lock().await;

        // someone else may have replaced the token while we waited
        let held = self.token.read().await.clone();
        match held {
            None => return Err(CredentialError::NoToken.into()),
            Some(token) if token.is_valid() && !token.is_expired() => return Ok(token),
            Some(_) => {}
        }

        if self.refresh_epoch.load(Ordering::Acquire) != seen_epoch {
            // an attempt finished while we waited and it did not succeed
            let cause = last_failure
                .clone()
                .unwrap_or_else(|| "earlier attempt failed".to_string());
            return Err(CredentialError::RefreshFailed(cause).into());
        }

        self.refresh_locked(&mut last_failure).await
    }

    /// `last_failure` is the slot guarded by `writer`.
    async fn refresh_locked(&self, last_failure: &mut Option<String>) -> Result<Token, ApiError> {
        let result = self.exchange_refresh().await;
        self.refresh_epoch.fetch_add(1, Ordering::AcqRel);

        match &result {
            Ok(_) => *last_failure = None,
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                *last_failure = Some(e.to_string());
            }
        }
        result
    }

    async fn exchange_refresh(&self) -> Result<Token, ApiError> {
        let held = self.token.read().await.clone();
        let Some(mut token) = held else {
            return Err(CredentialError::NoToken.into());
        };

        tracing::info!("Refreshing access token");
        let request = request::token_refresh(&self.endpoints, &self.app, &token);
        let body = self.dispatch(&request).await?;

        token.refresh(&body)?;
        if token.access_token.is_empty() {
            let cause = "answer carried no access token".to_string();
            return Err(CredentialError::RefreshFailed(cause).into());
        }

        self.store.set(&token).await?;
        *self.token.write().await = Some(token.clone());

        tracing::info!("Access token refreshed, valid for {}s", token.expires_in);
        Ok(token)
    }
}
