use crate::{
    error::ApiError,
    management::CredentialStore,
    spotify::{HttpTransport, ItemKind, SearchItem, SpotifyClient, SpotifyItem, decode, request},
    types::{Track, User},
    utils,
};

impl<T: HttpTransport, S: CredentialStore> SpotifyClient<T, S> {
    /// Fetches one entity by id, e.g. `client.get::<Album>("4aawyAB9vmqN3uQ7FjRGTy")`.
    pub async fn get<I: SpotifyItem>(&self, id: &str) -> Result<I, ApiError> {
        let body = self
            .send(request::get_item(&self.endpoints, I::KIND, id))
            .await?;
        Ok(decode::decode(&body)?)
    }

    /// Prefix search: `keyword` is sent as `keyword*` with the kind's search key.
    pub async fn find<I: SearchItem>(&self, keyword: &str) -> Result<Vec<I>, ApiError> {
        let body = self
            .send(request::search(&self.endpoints, I::KIND, keyword))
            .await?;
        Ok(decode::decode_search(&body)?)
    }

    /// First track matching `"<title> <artist>"`, if any.
    pub async fn get_track(&self, title: &str, artist: &str) -> Result<Option<Track>, ApiError> {
        let keyword = format!("{} {}", title, artist);
        let tracks: Vec<Track> = self.find(&keyword).await?;
        Ok(tracks.into_iter().next())
    }

    pub async fn my_profile(&self) -> Result<User, ApiError> {
        let body = self.send(request::my_profile(&self.endpoints)).await?;
        Ok(decode::decode(&body)?)
    }

    /// Looks for a non-explicit recording of `track`.
    ///
    /// Searches with field filters on the title and first artist and returns
    /// the best scoring candidate above the match threshold. `None` means no
    /// acceptable alternate was found; it is not an error.
    pub async fn find_clean_version(&self, track: &Track) -> Result<Option<Track>, ApiError> {
        let mut q = format!("track:{}", track.name);
        if let Some(artist) = track.artists.first() {
            q.push_str(&format!(" artist:{}", artist.name));
        }

        let body = self
            .send(request::search_query(&self.endpoints, ItemKind::Track, q))
            .await?;
        let candidates: Vec<Track> = decode::decode_search(&body)?;

        Ok(utils::best_clean_match(track, &candidates).cloned())
    }
}
