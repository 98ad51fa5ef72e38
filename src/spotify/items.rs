use std::{fmt, str::FromStr};

use serde::de::DeserializeOwned;

use crate::types::{Album, Artist, Playlist, Track, User};

/// Kind of catalogue entity, as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Track,
    Album,
    Artist,
    Playlist,
    User,
}

impl ItemKind {
    /// Value of the search `type` parameter.
    pub fn search_key(self) -> &'static str {
        match self {
            ItemKind::Track => "track",
            ItemKind::Album => "album",
            ItemKind::Artist => "artist",
            ItemKind::Playlist => "playlist",
            ItemKind::User => "user",
        }
    }

    /// Plural collection name: the search envelope key and the library path segment.
    pub fn plural(self) -> &'static str {
        match self {
            ItemKind::Track => "tracks",
            ItemKind::Album => "albums",
            ItemKind::Artist => "artists",
            ItemKind::Playlist => "playlists",
            ItemKind::User => "users",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.search_key())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "track" | "tracks" => Ok(ItemKind::Track),
            "album" | "albums" => Ok(ItemKind::Album),
            "artist" | "artists" => Ok(ItemKind::Artist),
            "playlist" | "playlists" => Ok(ItemKind::Playlist),
            "user" | "users" => Ok(ItemKind::User),
            other => Err(format!("unknown item kind: {}", other)),
        }
    }
}

/// An entity addressable by id.
pub trait SpotifyItem: DeserializeOwned + Send + 'static {
    const KIND: ItemKind;
}

/// An entity the search endpoint can return.
pub trait SearchItem: SpotifyItem {}

/// An entity the user can keep in their library under `me/<plural>`.
pub trait LibraryItem: SpotifyItem {
    /// Whether listing entries are wrapped as `{added_at, <kind>: {...}}`.
    const SAVED_WRAPPER: bool;
}

impl SpotifyItem for Track {
    const KIND: ItemKind = ItemKind::Track;
}

impl SpotifyItem for Album {
    const KIND: ItemKind = ItemKind::Album;
}

impl SpotifyItem for Artist {
    const KIND: ItemKind = ItemKind::Artist;
}

impl SpotifyItem for Playlist {
    const KIND: ItemKind = ItemKind::Playlist;
}

impl SpotifyItem for User {
    const KIND: ItemKind = ItemKind::User;
}

impl SearchItem for Track {}
impl SearchItem for Album {}
impl SearchItem for Artist {}
impl SearchItem for Playlist {}

impl LibraryItem for Track {
    const SAVED_WRAPPER: bool = true;
}

impl LibraryItem for Album {
    const SAVED_WRAPPER: bool = true;
}

impl LibraryItem for Playlist {
    const SAVED_WRAPPER: bool = false;
}
