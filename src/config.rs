//! Configuration management for the Spotify to YouTube Music migration.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. Every value has a default so the
//! tool works from a directory holding `oauth.json` and `playlists.json`
//! without any further setup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (handled by the CLI layer)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_YTMUSIC_API_URL: &str = "https://music.youtube.com/youtubei/v1";
pub const DEFAULT_OAUTH_FILE: &str = "oauth.json";
pub const DEFAULT_PLAYLISTS_FILE: &str = "playlists.json";
pub const DEFAULT_TRACK_SLEEP: f64 = 0.1;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotify2ytmusic/.env`
/// - macOS: `~/Library/Application Support/spotify2ytmusic/.env`
/// - Windows: `%LOCALAPPDATA%/spotify2ytmusic/.env`
///
/// A missing file is not an error; a file that exists but cannot be parsed is.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify2ytmusic/.env");
    path
}

/// Path of the YouTube Music OAuth credential file (`YTMUSIC_OAUTH_FILE`).
pub fn ytmusic_oauth_file() -> PathBuf {
    PathBuf::from(
        env::var("YTMUSIC_OAUTH_FILE").unwrap_or_else(|_| DEFAULT_OAUTH_FILE.into()),
    )
}

/// Base URL of the YouTube Music InnerTube API (`YTMUSIC_API_URL`).
pub fn ytmusic_api_url() -> String {
    env::var("YTMUSIC_API_URL").unwrap_or_else(|_| DEFAULT_YTMUSIC_API_URL.into())
}

/// Interface language sent with every request (`YTMUSIC_LANGUAGE`).
///
/// Search results are parsed by position, not by localized labels, but the
/// titles compared by the matcher are the ones YouTube Music renders for this
/// language.
pub fn ytmusic_language() -> String {
    env::var("YTMUSIC_LANGUAGE").unwrap_or_else(|_| "en".into())
}

/// Path of the Spotify export file (`SPOTIFY_PLAYLISTS_FILE`).
pub fn spotify_playlists_file() -> PathBuf {
    PathBuf::from(
        env::var("SPOTIFY_PLAYLISTS_FILE").unwrap_or_else(|_| DEFAULT_PLAYLISTS_FILE.into()),
    )
}

/// Pause between two tracks of a transfer (`TRACK_SLEEP`, seconds).
pub fn track_sleep() -> Duration {
    let secs = env::var("TRACK_SLEEP")
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(DEFAULT_TRACK_SLEEP);
    Duration::from_secs_f64(secs)
}
