//! Pure mapping from logical operations to wire requests.
//!
//! Nothing here touches the network or the token store. Every function takes
//! the [`Endpoints`] it builds against so the resource host and the accounts
//! host are never confused: resource calls are always rooted at
//! `endpoints.api`, authorization calls at `endpoints.accounts`.

use reqwest::Method;
use serde_json::{Value, json};
use url::Url;

use crate::{
    management::Token,
    spotify::ItemKind,
    types::{DeveloperApplication, Endpoints, NewPlaylist},
    utils,
};

pub const AUTHORIZATION: &str = "Authorization";

/// Permissions requested during authorization, in the order they are sent.
pub const SCOPES: [&str; 7] = [
    "user-read-private",
    "user-read-email",
    "user-library-modify",
    "user-library-read",
    "playlist-read-private",
    "playlist-modify-private",
    "playlist-modify-public",
];

/// What a request is for. Used for logging and by transports that route on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    GetItem,
    Profile,
    Library,
    Playlist,
    Authorize,
    TokenExchange,
    TokenRefresh,
}

/// Where `params` travel: in the query string or as a form-encoded body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamEncoding {
    Query,
    Form,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub operation: Operation,
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub params: Vec<(String, String)>,
    pub encoding: ParamEncoding,
    pub body: Option<Value>,
    pub requires_auth: bool,
}

impl ApiRequest {
    fn new(operation: Operation, method: Method, url: String) -> Self {
        ApiRequest {
            operation,
            method,
            url,
            headers: Vec::new(),
            params: Vec::new(),
            encoding: ParamEncoding::Query,
            body: None,
            requires_auth: true,
        }
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    fn header(mut self, key: &str, value: impl Into<String>) -> Self {
        self.headers.push((key.to_string(), value.into()));
        self
    }

    fn form(mut self) -> Self {
        self.encoding = ParamEncoding::Form;
        self
    }

    fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn unauthenticated(mut self) -> Self {
        self.requires_auth = false;
        self
    }

    /// Attaches the bearer header for `token`, replacing any earlier one.
    pub fn authorized(mut self, token: &Token) -> Self {
        self.headers.retain(|(k, _)| k != AUTHORIZATION);
        let (key, value) = bearer_header(token);
        self.headers.push((key, value));
        self
    }

    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Full target URL; query-encoded params are appended in order.
    pub fn target(&self) -> Result<Url, url::ParseError> {
        match self.encoding {
            ParamEncoding::Query if !self.params.is_empty() => {
                Url::parse_with_params(&self.url, self.params.iter())
            }
            _ => Url::parse(&self.url),
        }
    }
}

pub fn bearer_header(token: &Token) -> (String, String) {
    (
        AUTHORIZATION.to_string(),
        format!("Bearer {}", token.access_token),
    )
}

pub fn scope() -> String {
    SCOPES.join(" ")
}

pub fn search(endpoints: &Endpoints, kind: ItemKind, keyword: &str) -> ApiRequest {
    search_query(endpoints, kind, format!("{}*", keyword))
}

/// Search with a caller-built `q`, e.g. field filters like `track:<title>`.
pub fn search_query(endpoints: &Endpoints, kind: ItemKind, q: String) -> ApiRequest {
    ApiRequest::new(
        Operation::Search,
        Method::GET,
        format!("{}search", endpoints.api),
    )
    .param("q", q)
    .param("type", kind.search_key())
}

pub fn get_item(endpoints: &Endpoints, kind: ItemKind, id: &str) -> ApiRequest {
    let collection = match kind {
        ItemKind::User => "users",
        ItemKind::Track | ItemKind::Album | ItemKind::Artist | ItemKind::Playlist => kind.plural(),
    };
    ApiRequest::new(
        Operation::GetItem,
        Method::GET,
        format!("{}{}/{}", endpoints.api, collection, id),
    )
}

pub fn my_profile(endpoints: &Endpoints) -> ApiRequest {
    ApiRequest::new(Operation::Profile, Method::GET, format!("{}me/", endpoints.api))
}

pub fn library_url(endpoints: &Endpoints, kind: ItemKind) -> String {
    format!("{}me/{}", endpoints.api, kind.plural())
}

pub fn library(endpoints: &Endpoints, kind: ItemKind) -> ApiRequest {
    ApiRequest::new(Operation::Library, Method::GET, library_url(endpoints, kind))
}

pub fn save_tracks(endpoints: &Endpoints, ids: &[&str]) -> ApiRequest {
    ApiRequest::new(
        Operation::Library,
        Method::PUT,
        library_url(endpoints, ItemKind::Track),
    )
    .param("ids", ids.join(","))
}

pub fn delete_tracks(endpoints: &Endpoints, ids: &[&str]) -> ApiRequest {
    ApiRequest::new(
        Operation::Library,
        Method::DELETE,
        library_url(endpoints, ItemKind::Track),
    )
    .param("ids", ids.join(","))
}

pub fn contains_tracks(endpoints: &Endpoints, ids: &[&str]) -> ApiRequest {
    ApiRequest::new(
        Operation::Library,
        Method::GET,
        format!("{}me/tracks/contains", endpoints.api),
    )
    .param("ids", ids.join(","))
}

pub fn my_playlists(endpoints: &Endpoints, limit: u32) -> ApiRequest {
    ApiRequest::new(
        Operation::Playlist,
        Method::GET,
        format!("{}me/playlists", endpoints.api),
    )
    .param("limit", limit.to_string())
}

pub fn create_playlist(endpoints: &Endpoints, user_id: &str, playlist: &NewPlaylist) -> ApiRequest {
    let mut body = json!({ "name": playlist.name });
    if let Some(description) = &playlist.description {
        body["description"] = json!(description);
    }
    if let Some(public) = playlist.public {
        body["public"] = json!(public);
    }

    ApiRequest::new(
        Operation::Playlist,
        Method::POST,
        format!("{}users/{}/playlists", endpoints.api, user_id),
    )
    .json(body)
}

pub fn add_tracks(endpoints: &Endpoints, playlist_id: &str, uris: &[String]) -> ApiRequest {
    ApiRequest::new(
        Operation::Playlist,
        Method::POST,
        format!("{}playlists/{}/tracks", endpoints.api, playlist_id),
    )
    .json(json!({ "uris": uris }))
}

pub fn playlist_tracks(
    endpoints: &Endpoints,
    playlist_id: &str,
    offset: u32,
    limit: u32,
) -> ApiRequest {
    ApiRequest::new(
        Operation::Playlist,
        Method::GET,
        format!("{}playlists/{}/tracks", endpoints.api, playlist_id),
    )
    .param("offset", offset.to_string())
    .param("limit", limit.to_string())
}

pub fn authorize(endpoints: &Endpoints, app: &DeveloperApplication) -> ApiRequest {
    ApiRequest::new(
        Operation::Authorize,
        Method::GET,
        format!("{}authorize", endpoints.accounts),
    )
    .param("client_id", app.client_id.as_str())
    .param("response_type", "code")
    .param("redirect_uri", app.redirect_uri.as_str())
    .param("scope", scope())
    .unauthenticated()
}

pub fn token_exchange(endpoints: &Endpoints, app: &DeveloperApplication, code: &str) -> ApiRequest {
    ApiRequest::new(
        Operation::TokenExchange,
        Method::POST,
        format!("{}api/token", endpoints.accounts),
    )
    .param("client_id", app.client_id.as_str())
    .param("client_secret", app.client_secret.as_str())
    .param("grant_type", "authorization_code")
    .param("code", code)
    .param("redirect_uri", app.redirect_uri.as_str())
    .form()
    .unauthenticated()
}

pub fn token_refresh(endpoints: &Endpoints, app: &DeveloperApplication, token: &Token) -> ApiRequest {
    ApiRequest::new(
        Operation::TokenRefresh,
        Method::POST,
        format!("{}api/token", endpoints.accounts),
    )
    .param("grant_type", "refresh_token")
    .param("refresh_token", token.refresh_token.as_str())
    .header(
        AUTHORIZATION,
        utils::basic_auth_header(&app.client_id, &app.client_secret),
    )
    .form()
    .unauthenticated()
}
