#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    io,
    sync::Mutex,
    time::Duration,
};

use serde_json::{Value, json};
use spotclean::{
    error::{StoreError, TransportError},
    management::{CredentialStore, MemoryCredentialStore, Token},
    spotify::{HttpResponse, HttpTransport, SpotifyClient, request::ApiRequest},
    types::{DeveloperApplication, Endpoints},
};

pub const API: &str = "https://api.test/v1/";
pub const ACCOUNTS: &str = "https://accounts.test/";

pub const TOKEN_PATH: &str = "/api/token";
pub const SEARCH_PATH: &str = "/v1/search";

pub fn app() -> DeveloperApplication {
    DeveloperApplication::new("client-abc", "secret-xyz", "http://127.0.0.1:8888/callback")
}

pub fn endpoints() -> Endpoints {
    Endpoints::new(API, ACCOUNTS)
}

type Answer = Result<HttpResponse, String>;

/// Transport answering by URL path, recording every request it sees.
///
/// A path may hold several queued answers; they are served in order and the
/// last one repeats.
#[derive(Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<String, VecDeque<Answer>>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.set_route(path, status, body);
        self
    }

    pub fn set_route(&self, path: &str, status: u16, body: impl Into<String>) {
        let body: String = body.into();
        let answers = VecDeque::from([Ok(HttpResponse::new(status, body))]);
        self.routes.lock().unwrap().insert(path.to_string(), answers);
    }

    /// Queues another answer after the ones already held for `path`.
    pub fn then(self, path: &str, status: u16, body: impl Into<String>) -> Self {
        let body: String = body.into();
        self.routes
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(self, path: &str, reason: &str) -> Self {
        let answers = VecDeque::from([Err(reason.to_string())]);
        self.routes.lock().unwrap().insert(path.to_string(), answers);
        self
    }

    pub fn delay(self, path: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(path.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls()
            .iter()
            .filter(|request| path_of(&request.url) == path)
            .count()
    }

    pub fn last_call_to(&self, path: &str) -> Option<ApiRequest> {
        self.calls()
            .into_iter()
            .rev()
            .find(|request| path_of(&request.url) == path)
    }
}

fn path_of(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default()
}

impl HttpTransport for StubTransport {
    async fn request(&self, request: &ApiRequest) -> Result<HttpResponse, TransportError> {
        let path = path_of(&request.url);
        self.calls.lock().unwrap().push(request.clone());

        let delay = self.delays.lock().unwrap().get(&path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let answer = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&path) {
                Some(answers) if answers.len() > 1 => answers.pop_front(),
                Some(answers) => answers.front().cloned(),
                None => None,
            }
        };
        match answer {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(TransportError(reason)),
            None => Ok(HttpResponse::new(404, r#"{"error":"no route"}"#)),
        }
    }
}

/// Store whose writes always fail; reads see whatever it was seeded with.
pub struct FailingStore {
    inner: MemoryCredentialStore,
}

impl FailingStore {
    pub fn with_token(token: &Token) -> Self {
        FailingStore {
            inner: MemoryCredentialStore::with_token(token).unwrap(),
        }
    }
}

impl CredentialStore for FailingStore {
    async fn set(&self, _token: &Token) -> Result<(), StoreError> {
        Err(StoreError::Io(io::Error::other("disk full")))
    }

    async fn get(&self) -> Option<Token> {
        self.inner.get().await
    }

    async fn delete(&self) -> Result<(), StoreError> {
        Err(StoreError::Io(io::Error::other("disk full")))
    }
}

pub async fn client_with<S: CredentialStore>(
    transport: StubTransport,
    store: S,
) -> SpotifyClient<StubTransport, S> {
    SpotifyClient::with_endpoints(app(), endpoints(), transport, store).await
}

pub fn valid_token() -> Token {
    Token::new("access-1", 3600, "refresh-1", "Bearer")
}

/// A token saved two hours ago with a one hour lifetime.
pub fn expired_token() -> Token {
    let now = chrono::Utc::now().timestamp();
    Token::new("access-old", 3600, "refresh-1", "Bearer").with_save_time(now - 7200)
}

pub fn token_json() -> String {
    json!({
        "access_token": "access-new",
        "token_type": "Bearer",
        "scope": "user-read-private user-read-email",
        "expires_in": 3600,
        "refresh_token": "refresh-new"
    })
    .to_string()
}

pub fn refresh_json() -> String {
    json!({
        "access_token": "access-refreshed",
        "token_type": "Bearer",
        "scope": "user-read-private",
        "expires_in": 3600
    })
    .to_string()
}

pub fn track_json(id: &str, name: &str, explicit: bool, artists: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:track:{}", id),
        "explicit": explicit,
        "duration_ms": 215000,
        "popularity": 60,
        "artists": artists
            .iter()
            .map(|a| json!({ "id": format!("{}-id", a), "name": a, "uri": format!("spotify:artist:{}", a) }))
            .collect::<Vec<_>>(),
        "album": {
            "id": "album-1",
            "name": "Parachutes",
            "album_type": "album",
            "release_date": "2000-07-10",
            "images": [{ "url": "https://i.test/cover.jpg", "height": 640, "width": 640 }]
        }
    })
}

pub fn page_json(items: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "href": "https://api.test/v1/page",
        "items": items.clone(),
        "limit": 20,
        "offset": 0,
        "total": items.len(),
        "next": next,
        "previous": null
    })
}

pub fn search_json(plural: &str, items: Vec<Value>) -> String {
    let mut envelope = serde_json::Map::new();
    envelope.insert(plural.to_string(), page_json(items, None));
    Value::Object(envelope).to_string()
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "uri": format!("spotify:user:{}", id),
        "display_name": "Test User",
        "email": "user@example.com",
        "country": "DE",
        "product": "premium"
    })
}

pub fn playlist_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "uri": format!("spotify:playlist:{}", id),
        "description": "",
        "public": false,
        "collaborative": false,
        "snapshot_id": "snap-0",
        "owner": user_json("owner"),
        "tracks": { "href": format!("https://api.test/v1/playlists/{}/tracks", id), "total": 2 },
        "images": []
    })
}
