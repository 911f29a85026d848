//! # CLI Module
//!
//! This module implements the user-facing commands. Each command loads what
//! it needs (the Spotify export, the YouTube Music credentials), hands the
//! work to the [`crate::matcher`] and [`crate::transfer`] modules and prints
//! the outcome.
//!
//! ## Commands
//!
//! - [`list_playlists`] - Spotify playlists of the export with their track counts
//! - [`check`] - verifies the YouTube Music credentials with a library listing
//! - [`search`] - resolves one track and shows what would be added
//! - [`create_playlist`] - creates an empty YouTube Music playlist
//! - [`load_liked`] - likes the Spotify "Liked Songs" on YouTube Music
//! - [`load_liked_albums`] - likes every track of the saved Spotify albums
//! - [`copy_playlist`] - copies one Spotify playlist
//! - [`copy_all`] - copies every Spotify playlist
//! - [`copy_playlists`] - copies the Spotify playlists given by name
//!
//! ## Error Handling
//!
//! Configuration faults (missing `oauth.json`, unreadable `playlists.json`)
//! end the program through the `error!` macro before anything is written.
//! Faults on single tracks are reported by the transfer engine and counted.
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotify2ytmusic list-playlists
//! spotify2ytmusic load-liked --dry-run
//! spotify2ytmusic copy-playlist 37i9dQZF1DXcBWIGoYBM5M +Favourites --algo fuzzy
//! spotify2ytmusic copy-all --track-sleep 0.5
//! spotify2ytmusic copy-playlists "Road Trip" "Workout"
//! ```

use std::path::{Path, PathBuf};

use crate::{
    config, error,
    management::{CredentialsManager, SpotifyExport},
    warning,
    ytmusic::YtMusicClient,
};

mod check;
mod copy;
mod playlists;
mod search;

pub use check::check;
pub use copy::copy_all;
pub use copy::copy_playlist;
pub use copy::copy_playlists;
pub use copy::load_liked;
pub use copy::load_liked_albums;
pub use playlists::create_playlist;
pub use playlists::list_playlists;
pub use search::search;

/// Loads the OAuth credentials and builds the YouTube Music client, or exits.
async fn connect() -> YtMusicClient {
    let path = config::ytmusic_oauth_file();
    if !path.is_file() {
        error!(
            "No file '{}' exists. Have you logged in to YTMusic? Run 'ytmusicapi oauth' to login",
            path.display()
        );
    }

    let credentials = match CredentialsManager::load(&path).await {
        Ok(c) => c,
        Err(e) => error!(
            "Cannot read '{}': {}\nHave you logged in to YTMusic? Run 'ytmusicapi oauth' to login",
            path.display(),
            e
        ),
    };

    if credentials.is_expired() {
        warning!(
            "The access token in '{}' has expired, requests will probably fail. Refresh it with 'ytmusicapi oauth'",
            credentials.path().display()
        );
    }

    match YtMusicClient::new(&credentials) {
        Ok(client) => client,
        Err(e) => error!("Cannot set up the YTMusic client: {}", e),
    }
}

/// Loads the Spotify export, or exits.
async fn load_export(path: Option<PathBuf>) -> SpotifyExport {
    let path = path.unwrap_or_else(config::spotify_playlists_file);
    match SpotifyExport::load(Path::new(&path)).await {
        Ok(export) => export,
        Err(e) => error!("Failed to load '{}': {}", path.display(), e),
    }
}
