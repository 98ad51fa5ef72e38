use crate::{
    error::ApiError,
    management::CredentialStore,
    spotify::{HttpTransport, SpotifyClient},
    types::{NewPlaylist, Playlist, Track},
};

/// Suffix appended to the source name for the cleaned copy.
pub const CLEAN_SUFFIX: &str = "CLEANED";

/// What [`SpotifyClient::make_clean_playlist`] did.
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub playlist: Playlist,
    /// Tracks that were already clean and were copied as is.
    pub kept: usize,
    /// Explicit tracks for which a clean alternate was added.
    pub replaced: usize,
    /// Titles of explicit tracks with no acceptable alternate.
    pub missing: Vec<String>,
}

impl CleanReport {
    pub fn added(&self) -> usize {
        self.kept + self.replaced
    }
}

impl<T: HttpTransport, S: CredentialStore> SpotifyClient<T, S> {
    /// Copies a playlist without explicit tracks.
    ///
    /// Creates `"<name> CLEANED"` for the current user. Tracks that are not
    /// explicit are copied in their original order; for each explicit one a
    /// clean alternate is searched and, when found, appended after them. Local
    /// files are skipped. A failed search for one track is logged and counted
    /// as missing; any other failure aborts the workflow.
    pub async fn make_clean_playlist(&self, source_id: &str) -> Result<CleanReport, ApiError> {
        let source: Playlist = self.get(source_id).await?;
        let entries = self.playlist_tracks(source_id).await?;

        let (explicit, clean): (Vec<Track>, Vec<Track>) = entries
            .into_iter()
            .filter(|entry| !entry.is_local)
            .filter_map(|entry| entry.track)
            .filter(|track| !track.is_local)
            .partition(|track| track.explicit);

        let name = format!("{} {}", source.name, CLEAN_SUFFIX);
        let target = self.create_my_playlist(&NewPlaylist::named(name)).await?;

        let mut uris: Vec<String> = clean.iter().map(|track| track.uri.clone()).collect();
        let kept = uris.len();
        let mut replaced = 0;
        let mut missing = Vec::new();

        for track in &explicit {
            match self.find_clean_version(track).await {
                Ok(Some(alternate)) => {
                    tracing::debug!("{} -> {}", track.uri, alternate.uri);
                    uris.push(alternate.uri);
                    replaced += 1;
                }
                Ok(None) => missing.push(track.name.clone()),
                Err(e) => {
                    tracing::warn!("Clean search for {} failed: {}", track.name, e);
                    missing.push(track.name.clone());
                }
            }
        }

        self.add_tracks(&target.id, &uris).await?;

        tracing::info!(
            "Cleaned {} into {}: {} kept, {} replaced, {} missing",
            source.id,
            target.id,
            kept,
            replaced,
            missing.len()
        );

        Ok(CleanReport {
            playlist: target,
            kept,
            replaced,
            missing,
        })
    }
}
