use crate::{
    cli::{print_table, spinner},
    error, info,
    spotify::SpotifyClient,
    success,
    types::{NewPlaylist, PlaylistTableRow, TrackTableRow},
    warning,
};

pub async fn playlists(client: &SpotifyClient) {
    match client.my_playlists().await {
        Ok(playlists) => print_table(playlists.iter().map(PlaylistTableRow::from).collect()),
        Err(e) => error!("Cannot load playlists. Err: {}", e),
    }
}

pub async fn create_playlist(
    client: &SpotifyClient,
    name: &str,
    description: Option<String>,
    public: bool,
) {
    let playlist = NewPlaylist {
        name: name.to_string(),
        description,
        public: Some(public),
    };

    match client.create_my_playlist(&playlist).await {
        Ok(created) => success!("Playlist {} created ({}).", created.name, created.id),
        Err(e) => error!("Cannot create playlist. Err: {}", e),
    }
}

pub async fn playlist_tracks(client: &SpotifyClient, playlist_id: &str) {
    let pb = spinner("Loading playlist tracks");
    let entries = client.playlist_tracks(playlist_id).await;
    pb.finish_and_clear();

    match entries {
        Ok(entries) => {
            let rows: Vec<TrackTableRow> = entries
                .iter()
                .filter_map(|entry| entry.track.as_ref())
                .map(TrackTableRow::from)
                .collect();
            print_table(rows);
        }
        Err(e) => error!("Cannot load tracks of {}. Err: {}", playlist_id, e),
    }
}

pub async fn add_tracks(client: &SpotifyClient, playlist_id: &str, uris: &[String]) {
    match client.add_tracks(playlist_id, uris).await {
        Ok(Some(snapshot)) => success!("Added {} tracks (snapshot {}).", uris.len(), snapshot),
        Ok(None) => info!("No tracks given."),
        Err(e) => error!("Cannot add tracks to {}. Err: {}", playlist_id, e),
    }
}

pub async fn clean(client: &SpotifyClient, source_id: &str) {
    let pb = spinner("Building clean playlist");
    let report = client.make_clean_playlist(source_id).await;
    pb.finish_and_clear();

    match report {
        Ok(report) => {
            success!(
                "Created {} with {} tracks ({} kept, {} replaced).",
                report.playlist.name,
                report.added(),
                report.kept,
                report.replaced
            );
            for title in &report.missing {
                warning!("No clean version found for {}", title);
            }
        }
        Err(e) => error!("Cannot clean playlist {}. Err: {}", source_id, e),
    }
}
