//! # YouTube Music Integration Module
//!
//! This module provides the interface to YouTube Music used by the matcher
//! and the transfer engine. It is split in three parts:
//!
//! - [`MusicService`] - the capability trait the rest of the crate depends on.
//!   The matcher and the transfer engine receive an implementation through
//!   their constructors, which lets the tests plug in an in-memory fake.
//! - [`client`] - [`YtMusicClient`], the implementation talking to the
//!   InnerTube JSON API of the YouTube Music web client.
//! - [`parser`] - pure functions turning InnerTube responses into the crate's
//!   types.
//!
//! ## API Coverage
//!
//! - `POST /search` - song, video and album search (filtered by `params`)
//! - `POST /music/get_search_suggestions` - query completions
//! - `POST /browse` - album pages, playlist pages and the library playlists
//! - `POST /playlist/create` - create a playlist
//! - `POST /browse/edit_playlist` - append a video to a playlist
//! - `POST /like/like` - like a video
//!
//! ## Error Types
//!
//! Every operation returns [`ServiceError`]. Whether an error is retried is
//! decided by the caller, see [`crate::transfer::RetryPolicy`].

use std::fmt;

use async_trait::async_trait;

use crate::types::{AlbumSummary, CandidateTrack, PlaylistSummary, Privacy};

pub mod client;
pub mod parser;

pub use client::YtMusicClient;

#[derive(Debug)]
pub enum ServiceError {
    /// Network error or non-success HTTP status.
    Http(reqwest::Error),
    /// The service answered but reported a failure.
    Api(String),
    /// The response did not have the expected shape.
    Parse(String),
    /// The requested object does not exist.
    NotFound(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Http(e) => write!(f, "HTTP error: {}", e),
            ServiceError::Api(msg) => write!(f, "API error: {}", msg),
            ServiceError::Parse(msg) => write!(f, "unexpected response: {}", msg),
            ServiceError::NotFound(what) => write!(f, "not found: {}", what),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Http(err)
    }
}

/// Operations the migration needs from the destination music service.
#[async_trait]
pub trait MusicService: Send + Sync {
    async fn search_albums(&self, query: &str) -> Result<Vec<AlbumSummary>, ServiceError>;

    async fn search_songs(&self, query: &str) -> Result<Vec<CandidateTrack>, ServiceError>;

    async fn search_videos(&self, query: &str) -> Result<Vec<CandidateTrack>, ServiceError>;

    /// Query completions the web client would offer for `query`.
    async fn search_suggestions(&self, query: &str) -> Result<Vec<String>, ServiceError>;

    async fn get_album_tracks(&self, browse_id: &str) -> Result<Vec<CandidateTrack>, ServiceError>;

    /// Creates a playlist and returns its id.
    async fn create_playlist(
        &self,
        title: &str,
        description: &str,
        privacy: Privacy,
    ) -> Result<String, ServiceError>;

    async fn append_to_playlist(&self, playlist_id: &str, track_id: &str)
    -> Result<(), ServiceError>;

    async fn like_track(&self, track_id: &str) -> Result<(), ServiceError>;

    /// Playlists in the user's library.
    async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>, ServiceError>;

    async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistSummary, ServiceError>;
}
