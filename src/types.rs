use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Credentials of the application registered on the developer dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeveloperApplication {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl DeveloperApplication {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        DeveloperApplication {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }
}

/// The two base authorities. Both always end with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub api: String,
    pub accounts: String,
}

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1/";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com/";

impl Endpoints {
    pub fn new(api: impl Into<String>, accounts: impl Into<String>) -> Self {
        Endpoints {
            api: with_trailing_slash(api.into()),
            accounts: with_trailing_slash(accounts.into()),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_ACCOUNTS_URL)
    }
}

fn with_trailing_slash(mut base: String) -> String {
    if !base.ends_with('/') {
        base.push('/');
    }
    base
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: String,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub popularity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: Option<String>,
    pub name: String,
    pub album_type: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub album_type: String,
    pub release_date: String,
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub total_tracks: Option<u32>,
}

/// A track. `id` is absent for local files added to playlists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    pub explicit: bool,
    pub duration_ms: u64,
    pub artists: Vec<SimplifiedArtist>,
    pub album: Option<SimplifiedAlbum>,
    pub popularity: Option<u32>,
    #[serde(default)]
    pub is_local: bool,
}

impl Track {
    /// Artist names joined with `", "`.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn artwork_url(&self) -> Option<&str> {
        self.album
            .as_ref()
            .and_then(|a| a.images.first())
            .map(|i| i.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub uri: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub href: String,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: bool,
    pub snapshot_id: String,
    pub owner: User,
    pub tracks: Option<PlaylistTracksRef>,
    pub images: Option<Vec<Image>>,
}

/// One row of a playlist's track listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub added_at: Option<String>,
    #[serde(default)]
    pub is_local: bool,
    pub track: Option<Track>,
}

/// Paginated envelope shared by every collection endpoint.
///
/// Only `items` is required; the paging counters are absent in some envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// Library listings of tracks and albums wrap each entity with the date it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedItem<T> {
    pub added_at: String,
    #[serde(alias = "track", alias = "album")]
    pub item: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPlaylist {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

impl NewPlaylist {
    pub fn named(name: impl Into<String>) -> Self {
        NewPlaylist {
            name: name.into(),
            description: None,
            public: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub explicit: String,
    pub uri: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        TrackTableRow {
            name: track.name.clone(),
            artists: track.artist_names(),
            explicit: if track.explicit { "E" } else { "" }.to_string(),
            uri: track.uri.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub id: String,
    pub tracks: u32,
}

impl From<&Playlist> for PlaylistTableRow {
    fn from(playlist: &Playlist) -> Self {
        PlaylistTableRow {
            name: playlist.name.clone(),
            id: playlist.id.clone(),
            tracks: playlist.tracks.as_ref().map_or(0, |t| t.total),
        }
    }
}

#[derive(Tabled)]
pub struct ItemTableRow {
    pub name: String,
    pub id: String,
    pub uri: String,
}

impl From<&Album> for ItemTableRow {
    fn from(album: &Album) -> Self {
        ItemTableRow {
            name: format!("{} ({})", album.name, album.release_date),
            id: album.id.clone(),
            uri: album.uri.clone(),
        }
    }
}

impl From<&Artist> for ItemTableRow {
    fn from(artist: &Artist) -> Self {
        ItemTableRow {
            name: artist.name.clone(),
            id: artist.id.clone(),
            uri: artist.uri.clone(),
        }
    }
}

impl From<&User> for ItemTableRow {
    fn from(user: &User) -> Self {
        ItemTableRow {
            name: user.display_name.clone().unwrap_or_else(|| user.id.clone()),
            id: user.id.clone(),
            uri: user.uri.clone(),
        }
    }
}
