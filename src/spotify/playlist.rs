use crate::{
    error::ApiError,
    management::CredentialStore,
    spotify::{HttpTransport, SpotifyClient, decode, request},
    types::{NewPlaylist, Paging, Playlist, PlaylistTrack, SnapshotResponse},
};

/// Page size used when listing the user's playlists.
pub const MY_PLAYLISTS_LIMIT: u32 = 50;

/// Page size used when reading a playlist's tracks.
pub const PLAYLIST_TRACKS_LIMIT: u32 = 100;

/// Most track URIs accepted by a single add request.
pub const ADD_TRACKS_CHUNK: usize = 100;

impl<T: HttpTransport, S: CredentialStore> SpotifyClient<T, S> {
    /// Playlists owned or followed by the current user.
    ///
    /// Only the first page of up to [`MY_PLAYLISTS_LIMIT`] entries is read.
    pub async fn my_playlists(&self) -> Result<Vec<Playlist>, ApiError> {
        let body = self
            .send(request::my_playlists(&self.endpoints, MY_PLAYLISTS_LIMIT))
            .await?;
        let page: Paging<Playlist> = decode::decode_page(&body)?;
        Ok(page.items)
    }

    /// Creates a playlist owned by `user_id`.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Owner; must be the authorized user
    /// * `playlist` - Name and optional description and visibility
    ///
    /// # Returns
    ///
    /// The playlist as created by the service, including its id.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        playlist: &NewPlaylist,
    ) -> Result<Playlist, ApiError> {
        let body = self
            .send(request::create_playlist(&self.endpoints, user_id, playlist))
            .await?;
        let created: Playlist = decode::decode(&body)?;

        tracing::info!("Created playlist {} ({})", created.name, created.id);
        Ok(created)
    }

    /// Creates a playlist owned by the current user.
    pub async fn create_my_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist, ApiError> {
        let me = self.my_profile().await?;
        self.create_playlist(&me.id, playlist).await
    }

    /// Appends `uris` to a playlist in order.
    ///
    /// Lists longer than [`ADD_TRACKS_CHUNK`] are sent in several requests.
    /// Returns the snapshot id of the last request, or `None` when `uris` is
    /// empty and nothing was sent.
    ///
    /// # Errors
    ///
    /// Stops at the first failed chunk; earlier chunks stay applied.
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, ApiError> {
        let mut snapshot = None;

        for chunk in uris.chunks(ADD_TRACKS_CHUNK) {
            let body = self
                .send(request::add_tracks(&self.endpoints, playlist_id, chunk))
                .await?;
            let response: SnapshotResponse = decode::decode(&body)?;
            snapshot = Some(response.snapshot_id);
        }

        tracing::debug!("Added {} tracks to {}", uris.len(), playlist_id);
        Ok(snapshot)
    }

    /// Every entry of a playlist, following pagination to the end.
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<PlaylistTrack>, ApiError> {
        let mut entries = Vec::new();
        let mut offset = 0;

        loop {
            let request = request::playlist_tracks(
                &self.endpoints,
                playlist_id,
                offset,
                PLAYLIST_TRACKS_LIMIT,
            );
            let body = self.send(request).await?;
            let page: Paging<PlaylistTrack> = decode::decode_page(&body)?;

            let read = page.items.len() as u32;
            entries.extend(page.items);

            if page.next.is_none() || read == 0 {
                break;
            }
            offset += read;
        }

        Ok(entries)
    }
}
