//! Command implementations behind the `spotclean` binary.
//!
//! Each command takes the shared client, prints with the crate's console
//! macros and tables, and ends the process through `error!` on failure.

mod auth;
mod items;
mod playlist;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::{Table, Tabled};

pub use auth::{auth, logout, status};
pub use items::{get, library, me, save, saved, search, unsave};
pub use playlist::{add_tracks, clean, create_playlist, playlist_tracks, playlists};

pub(crate) fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub(crate) fn print_table<R: Tabled>(rows: Vec<R>) {
    if rows.is_empty() {
        crate::info!("Nothing to show.");
        return;
    }
    println!("{}", Table::new(rows));
}
