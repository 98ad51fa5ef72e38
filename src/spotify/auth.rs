use url::Url;

use crate::{
    error::{ApiError, CredentialError},
    management::{CredentialStore, Token},
    spotify::{HttpTransport, SpotifyClient, request},
    types::{DeveloperApplication, Endpoints},
    utils::{self, RedirectOutcome},
};

/// Builds the URL a user opens to grant this application access.
///
/// The URL is rooted at the accounts authority and carries `client_id`,
/// `response_type=code`, `redirect_uri` and the space-joined scope list, in
/// that order.
///
/// # Arguments
///
/// * `endpoints` - Authorities to build against
/// * `app` - Developer application registered with the service
///
/// # Example
///
/// ```
/// let url = authorization_url(&Endpoints::default(), &app)?;
/// webbrowser::open(url.as_str())?;
/// ```
pub fn authorization_url(
    endpoints: &Endpoints,
    app: &DeveloperApplication,
) -> Result<Url, url::ParseError> {
    request::authorize(endpoints, app).target()
}

impl<T: HttpTransport, S: CredentialStore> SpotifyClient<T, S> {
    /// Starts authorization if the user has not granted access yet.
    ///
    /// Returns `None` when a usable token is already held, so the caller has
    /// nothing to do. Otherwise returns the authorization URL the user must
    /// visit. Nothing is sent over the network either way.
    ///
    /// # Example
    ///
    /// ```
    /// if let Some(url) = client.authorize().await? {
    ///     println!("Open {} to continue", url);
    /// }
    /// ```
    pub async fn authorize(&self) -> Result<Option<Url>, ApiError> {
        if self.has_token().await {
            return Ok(None);
        }
        Ok(Some(authorization_url(&self.endpoints, &self.app)?))
    }

    /// Returns the authorization URL if no token is held, otherwise makes
    /// sure the held token is fresh.
    ///
    /// An expired token is refreshed exactly as an authenticated call would
    /// refresh it, so concurrent callers still share a single exchange.
    pub async fn refresh_if_needed(&self) -> Result<Option<Url>, ApiError> {
        if !self.has_token().await {
            return self.authorize().await;
        }
        self.fresh_token().await?;
        Ok(None)
    }

    /// Exchanges an authorization code for a token and persists it.
    ///
    /// The exchange goes to the accounts authority with the application's
    /// client credentials. The resulting token replaces any held one only after
    /// it has been written to the credential store; if the exchange, the decode
    /// or the write fails, the previous state is left untouched.
    ///
    /// # Arguments
    ///
    /// * `code` - One-time code from the authorization redirect
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] when the accounts service rejects the code
    /// - [`CredentialError::InvalidToken`] when the answer lacks a required field
    /// - [`ApiError::Store`] when the token could not be persisted
    pub async fn save_token(&self, code: &str) -> Result<(), ApiError> {
        let _guard = self.writer.lock().await;

        let request = request::token_exchange(&self.endpoints, &self.app, code);
        let body = self.send(request).await?;
        let token = Token::from_payload(&body)?;

        if !token.is_valid() {
            tracing::warn!("Token exchange answered without all required fields");
            return Err(CredentialError::InvalidToken.into());
        }

        self.install(token).await
    }

    /// Reads the code out of a full redirect URL and saves the token for it.
    ///
    /// A redirect carrying `error=<reason>` yields
    /// [`CredentialError::AuthorizationDenied`]; one with neither code nor
    /// error yields [`CredentialError::MissingCode`].
    pub async fn save_token_from_redirect(&self, redirect: &str) -> Result<(), ApiError> {
        match utils::parse_redirect(redirect) {
            RedirectOutcome::Code(code) => self.save_token(&code).await,
            RedirectOutcome::Denied(reason) => {
                Err(CredentialError::AuthorizationDenied(reason).into())
            }
            RedirectOutcome::Missing => Err(CredentialError::MissingCode.into()),
        }
    }

    /// Installs a token built from known fields, stamped with the current time.
    pub async fn save_token_fields(
        &self,
        access_token: &str,
        expires_in: u64,
        refresh_token: &str,
        token_type: &str,
    ) -> Result<(), ApiError> {
        let token = Token::new(access_token, expires_in, refresh_token, token_type);
        if !token.is_valid() {
            return Err(CredentialError::InvalidToken.into());
        }

        let _guard = self.writer.lock().await;
        self.install(token).await
    }

    /// Forgets the held token, in memory and in the credential store.
    ///
    /// Does nothing when no token is held.
    pub async fn deauthorize(&self) -> Result<(), ApiError> {
        let _guard = self.writer.lock().await;

        let held = self.token.read().await.is_some();
        if !held {
            return Ok(());
        }

        self.store.delete().await?;
        *self.token.write().await = None;

        tracing::info!("Token removed");
        Ok(())
    }

    /// Caller must hold `writer`.
    async fn install(&self, token: Token) -> Result<(), ApiError> {
        self.store.set(&token).await?;
        tracing::info!(
            "Token saved ({}, valid for {}s)",
            token.token_type,
            token.expires_in
        );
        *self.token.write().await = Some(token);
        Ok(())
    }
}
