use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing_subscriber::EnvFilter;

use spotclean::{cli, config, error, spotify::ItemKind, spotify::SpotifyClient};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[clap(about = "Authorize spotclean with your account")]
    Auth,

    #[clap(about = "Remove the stored token")]
    Logout,

    #[clap(about = "Show the state of the stored token")]
    Status,

    #[clap(about = "Prefix search for tracks, albums, artists or playlists")]
    Search(SearchOptions),

    #[clap(about = "Fetch one item by id")]
    Get(GetOptions),

    #[clap(about = "List saved tracks, albums or playlists")]
    Library(LibraryOptions),

    #[clap(about = "Save a track to your library")]
    Save(TrackOptions),

    #[clap(about = "Remove a track from your library")]
    Unsave(TrackOptions),

    #[clap(about = "Check whether a track is in your library")]
    Saved(TrackOptions),

    #[clap(about = "Show your profile")]
    Me,

    #[clap(about = "List your playlists")]
    Playlists,

    #[clap(about = "Create, read or extend a playlist")]
    Playlist(PlaylistOptions),

    #[clap(about = "Copy a playlist without explicit tracks")]
    Clean(CleanOptions),

    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    kind: ItemKind,
    keyword: String,
}

#[derive(Parser, Debug, Clone)]
pub struct GetOptions {
    kind: ItemKind,
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct LibraryOptions {
    #[clap(default_value = "tracks")]
    kind: ItemKind,
}

#[derive(Parser, Debug, Clone)]
pub struct TrackOptions {
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[command(subcommand)]
    command: PlaylistSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistSubcommand {
    Create(PlaylistCreateOpts),
    Tracks(PlaylistIdOpts),
    Add(PlaylistAddOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistCreateOpts {
    name: String,
    #[clap(long)]
    description: Option<String>,
    #[clap(long)]
    public: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistIdOpts {
    id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistAddOpts {
    id: String,
    #[clap(required = true, num_args = 1..)]
    uris: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CleanOptions {
    playlist_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let client = match SpotifyClient::from_env().await {
        Ok(client) => Arc::new(client),
        Err(e) => error!("Cannot configure client. Err: {}", e),
    };

    match cli.command {
        Command::Auth => cli::auth(Arc::clone(&client)).await,
        Command::Logout => cli::logout(&client).await,
        Command::Status => cli::status(&client).await,
        Command::Search(opt) => cli::search(&client, opt.kind, &opt.keyword).await,
        Command::Get(opt) => cli::get(&client, opt.kind, &opt.id).await,
        Command::Library(opt) => cli::library(&client, opt.kind).await,
        Command::Save(opt) => cli::save(&client, &opt.id).await,
        Command::Unsave(opt) => cli::unsave(&client, &opt.id).await,
        Command::Saved(opt) => cli::saved(&client, &opt.id).await,
        Command::Me => cli::me(&client).await,
        Command::Playlists => cli::playlists(&client).await,
        Command::Playlist(opt) => match opt.command {
            PlaylistSubcommand::Create(c) => {
                cli::create_playlist(&client, &c.name, c.description, c.public).await
            }
            PlaylistSubcommand::Tracks(t) => cli::playlist_tracks(&client, &t.id).await,
            PlaylistSubcommand::Add(a) => cli::add_tracks(&client, &a.id, &a.uris).await,
        },
        Command::Clean(opt) => cli::clean(&client, &opt.playlist_id).await,
        Command::Completions(_) => {}
    }
}
