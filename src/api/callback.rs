use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::spotify::SpotifyClient;

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(client): Extension<Arc<SpotifyClient>>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        tracing::warn!("Authorization denied: {}", reason);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code").filter(|code| !code.is_empty()) else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    match client.save_token(code).await {
        Ok(()) => Html("<h2>Authentication successful.</h2><p>Close browser window.</p>"),
        Err(e) => {
            tracing::warn!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
