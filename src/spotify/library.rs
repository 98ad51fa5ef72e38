use crate::{
    error::ApiError,
    management::CredentialStore,
    spotify::{HttpTransport, LibraryItem, SpotifyClient, decode, request},
};

impl<T: HttpTransport, S: CredentialStore> SpotifyClient<T, S> {
    /// Lists the user's saved entities of kind `I`.
    ///
    /// Saved tracks and albums arrive wrapped as `{added_at, track: {...}}`;
    /// the wrapper is removed so the caller gets plain [`Track`] or [`Album`]
    /// values.
    ///
    /// [`Track`]: crate::types::Track
    /// [`Album`]: crate::types::Album
    pub async fn library<I: LibraryItem>(&self) -> Result<Vec<I>, ApiError> {
        let body = self
            .send(request::library(&self.endpoints, I::KIND))
            .await?;
        Ok(decode::decode_library(&body)?)
    }

    pub async fn save_track(&self, track_id: &str) -> Result<(), ApiError> {
        self.send(request::save_tracks(&self.endpoints, &[track_id]))
            .await?;
        tracing::info!("Saved track {}", track_id);
        Ok(())
    }

    pub async fn delete_track(&self, track_id: &str) -> Result<(), ApiError> {
        self.send(request::delete_tracks(&self.endpoints, &[track_id]))
            .await?;
        tracing::info!("Removed track {}", track_id);
        Ok(())
    }

    /// Whether `track_id` is in the user's saved tracks.
    pub async fn is_saved(&self, track_id: &str) -> Result<bool, ApiError> {
        let body = self
            .send(request::contains_tracks(&self.endpoints, &[track_id]))
            .await?;
        Ok(decode::decode_contains(&body)?)
    }
}
