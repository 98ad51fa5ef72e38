use crate::{
    cli::{print_table, spinner},
    error, info,
    spotify::{ItemKind, SpotifyClient},
    success,
    types::{Album, Artist, ItemTableRow, Playlist, PlaylistTableRow, Track, TrackTableRow, User},
    warning,
};

pub async fn search(client: &SpotifyClient, kind: ItemKind, keyword: &str) {
    let pb = spinner(format!("Searching {} for \"{}\"", kind.plural(), keyword));

    let result = match kind {
        ItemKind::Track => client
            .find::<Track>(keyword)
            .await
            .map(|items| print_tracks(&items)),
        ItemKind::Album => client
            .find::<Album>(keyword)
            .await
            .map(|items| print_items(&items)),
        ItemKind::Artist => client
            .find::<Artist>(keyword)
            .await
            .map(|items| print_items(&items)),
        ItemKind::Playlist => client
            .find::<Playlist>(keyword)
            .await
            .map(|items| print_playlists(&items)),
        ItemKind::User => {
            pb.finish_and_clear();
            warning!("Users cannot be searched; use `spotclean get user <id>`.");
            return;
        }
    };

    pb.finish_and_clear();
    if let Err(e) = result {
        error!("Search failed. Err: {}", e);
    }
}

pub async fn get(client: &SpotifyClient, kind: ItemKind, id: &str) {
    let result = match kind {
        ItemKind::Track => client.get::<Track>(id).await.map(|t| print_tracks(&[t])),
        ItemKind::Album => client.get::<Album>(id).await.map(|a| print_items(&[a])),
        ItemKind::Artist => client.get::<Artist>(id).await.map(|a| print_items(&[a])),
        ItemKind::Playlist => client
            .get::<Playlist>(id)
            .await
            .map(|p| print_playlists(&[p])),
        ItemKind::User => client.get::<User>(id).await.map(|u| print_items(&[u])),
    };

    if let Err(e) = result {
        error!("Cannot fetch {} {}. Err: {}", kind, id, e);
    }
}

pub async fn library(client: &SpotifyClient, kind: ItemKind) {
    let pb = spinner(format!("Loading saved {}", kind.plural()));

    let result = match kind {
        ItemKind::Track => client
            .library::<Track>()
            .await
            .map(|items| print_tracks(&items)),
        ItemKind::Album => client
            .library::<Album>()
            .await
            .map(|items| print_items(&items)),
        ItemKind::Playlist => client
            .library::<Playlist>()
            .await
            .map(|items| print_playlists(&items)),
        ItemKind::Artist | ItemKind::User => {
            pb.finish_and_clear();
            warning!("The library does not hold {}.", kind.plural());
            return;
        }
    };

    pb.finish_and_clear();
    if let Err(e) = result {
        error!("Cannot load library. Err: {}", e);
    }
}

pub async fn save(client: &SpotifyClient, track_id: &str) {
    match client.save_track(track_id).await {
        Ok(()) => success!("Saved {}.", track_id),
        Err(e) => error!("Cannot save {}. Err: {}", track_id, e),
    }
}

pub async fn unsave(client: &SpotifyClient, track_id: &str) {
    match client.delete_track(track_id).await {
        Ok(()) => success!("Removed {}.", track_id),
        Err(e) => error!("Cannot remove {}. Err: {}", track_id, e),
    }
}

pub async fn saved(client: &SpotifyClient, track_id: &str) {
    match client.is_saved(track_id).await {
        Ok(true) => success!("{} is in your library.", track_id),
        Ok(false) => info!("{} is not in your library.", track_id),
        Err(e) => error!("Cannot check {}. Err: {}", track_id, e),
    }
}

pub async fn me(client: &SpotifyClient) {
    match client.my_profile().await {
        Ok(user) => {
            info!(
                "{} ({})",
                user.display_name.as_deref().unwrap_or(&user.id),
                user.uri
            );
            if let Some(email) = &user.email {
                info!("Email: {}", email);
            }
            if let Some(product) = &user.product {
                info!("Plan: {}", product);
            }
        }
        Err(e) => error!("Cannot load profile. Err: {}", e),
    }
}

fn print_tracks(tracks: &[Track]) {
    print_table(tracks.iter().map(TrackTableRow::from).collect());
}

fn print_playlists(playlists: &[Playlist]) {
    print_table(playlists.iter().map(PlaylistTableRow::from).collect());
}

fn print_items<'a, I>(items: &'a [I])
where
    ItemTableRow: From<&'a I>,
{
    print_table(items.iter().map(ItemTableRow::from).collect());
}
