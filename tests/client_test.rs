mod common;

use std::{sync::Arc, time::Duration};

use serde_json::json;
use spotclean::{
    error::{ApiError, CredentialError},
    management::{CredentialStore, MemoryCredentialStore, Token},
    types::Track,
};
use tokio::task::JoinSet;

use common::{
    FailingStore, SEARCH_PATH, StubTransport, TOKEN_PATH, client_with, expired_token,
    refresh_json, search_json, token_json, track_json, valid_token,
};

fn yellow_search() -> String {
    search_json(
        "tracks",
        vec![track_json("t1", "Yellow", false, &["Coldplay"])],
    )
}

fn is_credential(err: &ApiError, expected: CredentialError) -> bool {
    matches!(err, ApiError::Credential(e) if *e == expected)
}

#[tokio::test]
async fn test_authorize_without_token_returns_url() {
    let client = client_with(StubTransport::new(), MemoryCredentialStore::new()).await;
    let url = client.authorize().await.unwrap().unwrap();

    assert!(url.as_str().starts_with("https://accounts.test/authorize?"));
    let scope = url
        .query_pairs()
        .find(|(k, _)| k == "scope")
        .map(|(_, v)| v.into_owned());
    assert_eq!(
        scope.as_deref(),
        Some(
            "user-read-private user-read-email user-library-modify user-library-read \
             playlist-read-private playlist-modify-private playlist-modify-public"
        )
    );
    assert_eq!(client.transport().call_count(), 0);
}

#[tokio::test]
async fn test_authorize_with_token_is_noop() {
    let store = MemoryCredentialStore::with_token(&valid_token()).unwrap();
    let client = client_with(StubTransport::new(), store).await;

    assert!(client.has_token().await);
    assert_eq!(client.authorize().await.unwrap(), None);
}

#[tokio::test]
async fn test_save_token_persists_exchange_result() {
    let transport = StubTransport::new().route(TOKEN_PATH, 200, token_json());
    let client = client_with(transport, MemoryCredentialStore::new()).await;

    client.save_token("AUTHCODE123").await.unwrap();

    let held = client.token().await.unwrap();
    assert_eq!(held.access_token, "access-new");
    assert_eq!(held.refresh_token, "refresh-new");
    assert_eq!(client.store().get().await, Some(held));

    let exchange = client.transport().last_call_to(TOKEN_PATH).unwrap();
    assert_eq!(exchange.param_value("code"), Some("AUTHCODE123"));
    assert_eq!(exchange.param_value("grant_type"), Some("authorization_code"));
}

#[tokio::test]
async fn test_save_token_rejects_incomplete_payload() {
    let transport =
        StubTransport::new().route(TOKEN_PATH, 200, json!({ "access_token": "a" }).to_string());
    let store = MemoryCredentialStore::with_token(&valid_token()).unwrap();
    let client = client_with(transport, store).await;

    let err = client.save_token("code").await.unwrap_err();

    assert!(is_credential(&err, CredentialError::InvalidToken));
    assert_eq!(client.token().await.unwrap().access_token, "access-1");
}

#[tokio::test]
async fn test_save_token_http_failure_keeps_state() {
    let transport = StubTransport::new().route(TOKEN_PATH, 400, r#"{"error":"invalid_grant"}"#);
    let client = client_with(transport, MemoryCredentialStore::new()).await;

    let err = client.save_token("bad").await.unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 400, .. }));
    assert_eq!(client.token().await, None);
}

#[tokio::test]
async fn test_save_token_store_failure_keeps_memory_untouched() {
    let transport = StubTransport::new().route(TOKEN_PATH, 200, token_json());
    let client = client_with(transport, FailingStore::with_token(&valid_token())).await;

    let err = client.save_token("code").await.unwrap_err();

    assert!(matches!(err, ApiError::Store(_)));
    assert_eq!(client.token().await.unwrap().access_token, "access-1");
}

#[tokio::test]
async fn test_save_token_from_redirect() {
    let transport = StubTransport::new().route(TOKEN_PATH, 200, token_json());
    let client = client_with(transport, MemoryCredentialStore::new()).await;

    let denied = client
        .save_token_from_redirect("http://127.0.0.1:8888/callback?error=access_denied")
        .await
        .unwrap_err();
    assert!(is_credential(
        &denied,
        CredentialError::AuthorizationDenied("access_denied".to_string())
    ));

    let missing = client
        .save_token_from_redirect("http://127.0.0.1:8888/callback")
        .await
        .unwrap_err();
    assert!(is_credential(&missing, CredentialError::MissingCode));
    assert_eq!(client.transport().call_count(), 0);

    client
        .save_token_from_redirect("http://127.0.0.1:8888/callback?code=AUTHCODE123&state=x")
        .await
        .unwrap();
    assert!(client.has_token().await);
}

#[tokio::test]
async fn test_save_token_fields_persists() {
    let client = client_with(StubTransport::new(), MemoryCredentialStore::new()).await;

    client
        .save_token_fields("access", 3600, "refresh", "Bearer")
        .await
        .unwrap();

    assert_eq!(client.store().get().await.unwrap().access_token, "access");
    assert!(
        client
            .save_token_fields("", 3600, "refresh", "Bearer")
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_no_token_short_circuits_without_network() {
    let transport = StubTransport::new().route(SEARCH_PATH, 200, yellow_search());
    let client = client_with(transport, MemoryCredentialStore::new()).await;

    let err = client.find::<Track>("Yellow").await.unwrap_err();

    assert!(is_credential(&err, CredentialError::NoToken));
    assert_eq!(client.transport().call_count(), 0);
}

#[tokio::test]
async fn test_invalid_token_short_circuits_without_network() {
    let store = MemoryCredentialStore::new();
    store.put_raw(
        &json!({
            "access_token": "a",
            "refresh_token": "",
            "token_type": "Bearer",
            "expires_in": 3600,
            "save_time": 0
        })
        .to_string(),
    );
    let client = client_with(StubTransport::new(), store).await;

    let err = client.my_profile().await.unwrap_err();

    assert!(is_credential(&err, CredentialError::InvalidToken));
    assert_eq!(client.transport().call_count(), 0);
}

#[tokio::test]
async fn test_find_unwraps_envelope_with_bearer() {
    let transport = StubTransport::new().route(SEARCH_PATH, 200, yellow_search());
    let store = MemoryCredentialStore::with_token(&valid_token()).unwrap();
    let client = client_with(transport, store).await;

    let tracks: Vec<Track> = client.find("Yellow").await.unwrap();

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "Yellow");
    let sent = client.transport().last_call_to(SEARCH_PATH).unwrap();
    assert_eq!(sent.header_value("Authorization"), Some("Bearer access-1"));
    assert_eq!(sent.param_value("q"), Some("Yellow*"));
    assert_eq!(client.transport().calls_to(TOKEN_PATH), 0);
}

#[tokio::test]
async fn test_expired_token_refreshes_once_before_call() {
    let transport = StubTransport::new()
        .route(TOKEN_PATH, 200, refresh_json())
        .route(SEARCH_PATH, 200, yellow_search());
    let store = MemoryCredentialStore::with_token(&expired_token()).unwrap();
    let client = client_with(transport, store).await;

    client.find::<Track>("Yellow").await.unwrap();

    let calls = client.transport().calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].url.ends_with("/api/token"));
    assert_eq!(
        calls[1].header_value("Authorization"),
        Some("Bearer access-refreshed")
    );

    let held = client.token().await.unwrap();
    assert!(!held.is_expired());
    assert_eq!(held.refresh_token, "refresh-1");
    assert_eq!(client.store().get().await, Some(held));
}

#[tokio::test]
async fn test_concurrent_calls_share_one_refresh() {
    let transport = StubTransport::new()
        .route(TOKEN_PATH, 200, refresh_json())
        .route(SEARCH_PATH, 200, yellow_search())
        .delay(TOKEN_PATH, Duration::from_millis(100));
    let store = MemoryCredentialStore::with_token(&expired_token()).unwrap();
    let client = Arc::new(client_with(transport, store).await);

    let mut set = JoinSet::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        set.spawn(async move { client.find::<Track>("Yellow").await });
    }
    while let Some(result) = set.join_next().await {
        assert_eq!(result.unwrap().unwrap().len(), 1);
    }

    assert_eq!(client.transport().calls_to(TOKEN_PATH), 1);
    assert_eq!(client.transport().calls_to(SEARCH_PATH), 8);
    assert!(
        client
            .transport()
            .calls()
            .iter()
            .filter(|c| c.url.ends_with("/search"))
            .all(|c| c.header_value("Authorization") == Some("Bearer access-refreshed"))
    );
}

#[tokio::test]
async fn test_refresh_failure_keeps_token() {
    let transport = StubTransport::new()
        .route(TOKEN_PATH, 500, "oops")
        .route(SEARCH_PATH, 200, yellow_search());
    let store = MemoryCredentialStore::with_token(&expired_token()).unwrap();
    let client = client_with(transport, store).await;

    let err = client.find::<Track>("Yellow").await.unwrap_err();

    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert_eq!(client.transport().calls_to(SEARCH_PATH), 0);
    let held = client.token().await.unwrap();
    assert_eq!(held.access_token, "access-old");
    assert!(held.is_expired());

    // the next call tries again
    client.transport().set_route(TOKEN_PATH, 200, refresh_json());
    client.find::<Track>("Yellow").await.unwrap();
    assert_eq!(client.transport().calls_to(TOKEN_PATH), 2);
}

#[tokio::test]
async fn test_waiters_on_failed_refresh_get_its_cause() {
    let transport = StubTransport::new()
        .route(TOKEN_PATH, 500, "upstream down")
        .route(SEARCH_PATH, 200, yellow_search())
        .delay(TOKEN_PATH, Duration::from_millis(100));
    let store = MemoryCredentialStore::with_token(&expired_token()).unwrap();
    let client = Arc::new(client_with(transport, store).await);

    let mut set = JoinSet::new();
    for _ in 0..8 {
        let client = Arc::clone(&client);
        set.spawn(async move { client.find::<Track>("Yellow").await });
    }
    let mut errors = Vec::new();
    while let Some(result) = set.join_next().await {
        errors.push(result.unwrap().unwrap_err());
    }

    assert_eq!(client.transport().calls_to(TOKEN_PATH), 1);
    assert_eq!(client.transport().calls_to(SEARCH_PATH), 0);
    let direct = errors
        .iter()
        .filter(|e| matches!(e, ApiError::Http { status: 500, .. }))
        .count();
    assert_eq!(direct, 1);
    for err in errors.iter().filter(|e| !matches!(e, ApiError::Http { .. })) {
        match err {
            ApiError::Credential(CredentialError::RefreshFailed(cause)) => {
                assert!(cause.contains("HTTP 500"), "cause: {}", cause);
                assert!(cause.contains("upstream down"), "cause: {}", cause);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_token_exchange_goes_out_without_bearer() {
    let transport = StubTransport::new().route(TOKEN_PATH, 200, token_json());
    let store = MemoryCredentialStore::with_token(&valid_token()).unwrap();
    let client = client_with(transport, store).await;

    client.save_token("code-123").await.unwrap();

    let exchange = client.transport().last_call_to(TOKEN_PATH).unwrap();
    assert!(!exchange.requires_auth);
    assert_eq!(exchange.header_value("Authorization"), None);
    assert_eq!(exchange.param_value("code"), Some("code-123"));
}

#[tokio::test]
async fn test_token_exchange_ignores_incomplete_held_token() {
    let transport = StubTransport::new().route(TOKEN_PATH, 200, token_json());
    let broken = Token::new("", 3600, "refresh-1", "Bearer");
    let store = MemoryCredentialStore::with_token(&broken).unwrap();
    let client = client_with(transport, store).await;

    client.save_token("code-123").await.unwrap();

    assert_eq!(client.token().await.unwrap().access_token, "access-new");
}

#[tokio::test]
async fn test_resource_calls_carry_bearer() {
    let transport = StubTransport::new().route(SEARCH_PATH, 200, yellow_search());
    let store = MemoryCredentialStore::with_token(&valid_token()).unwrap();
    let client = client_with(transport, store).await;

    client.find::<Track>("Yellow").await.unwrap();

    let search = client.transport().last_call_to(SEARCH_PATH).unwrap();
    assert!(search.requires_auth);
    assert_eq!(search.header_value("Authorization"), Some("Bearer access-1"));
}

#[tokio::test]
async fn test_refresh_without_access_token_fails() {
    let transport = StubTransport::new().route(TOKEN_PATH, 200, r#"{"expires_in":3600}"#);
    let store = MemoryCredentialStore::with_token(&expired_token()).unwrap();
    let client = client_with(transport, store).await;

    let err = client.refresh_token().await.unwrap_err();

    assert!(matches!(
        err,
        ApiError::Credential(CredentialError::RefreshFailed(ref cause)) if cause.contains("no access token")
    ));
    assert_eq!(client.token().await.unwrap().access_token, "access-old");
}

#[tokio::test]
async fn test_transport_failure_is_distinct_from_http() {
    let transport = StubTransport::new().fail(SEARCH_PATH, "connection refused");
    let store = MemoryCredentialStore::with_token(&valid_token()).unwrap();
    let client = client_with(transport, store).await;

    let err = client.find::<Track>("Yellow").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_http_failure_surfaces_status() {
    let transport = StubTransport::new().route(SEARCH_PATH, 429, "slow down");
    let store = MemoryCredentialStore::with_token(&valid_token()).unwrap();
    let client = client_with(transport, store).await;

    match client.find::<Track>("Yellow").await.unwrap_err() {
        ApiError::Http { status, url, body } => {
            assert_eq!(status, 429);
            assert_eq!(url, "https://api.test/v1/search");
            assert_eq!(body, "slow down");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_deauthorize_clears_memory_and_store() {
    let store = MemoryCredentialStore::with_token(&valid_token()).unwrap();
    let client = client_with(StubTransport::new(), store).await;

    client.deauthorize().await.unwrap();

    assert!(!client.has_token().await);
    assert_eq!(client.store().get().await, None);
    assert!(client.authorize().await.unwrap().is_some());

    // nothing held: still fine
    client.deauthorize().await.unwrap();
}

#[tokio::test]
async fn test_refresh_if_needed() {
    let transport = StubTransport::new().route(TOKEN_PATH, 200, refresh_json());
    let client = client_with(transport, MemoryCredentialStore::new()).await;
    assert!(client.refresh_if_needed().await.unwrap().is_some());

    client
        .save_token_fields("access", 3600, "refresh", "Bearer")
        .await
        .unwrap();
    assert_eq!(client.refresh_if_needed().await.unwrap(), None);
    assert_eq!(client.transport().calls_to(TOKEN_PATH), 0);
}
