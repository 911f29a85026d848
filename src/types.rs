use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Identity of a track in the Spotify export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub title: String,
    pub artist: String,
    pub album: String,
}

impl TrackDescriptor {
    pub fn new(title: &str, artist: &str, album: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
        }
    }
}

impl fmt::Display for TrackDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.title, self.artist, self.album)
    }
}

/// One entry produced by a source iterator.
///
/// Malformed entries of the export are not dropped silently; they are handed
/// to the transfer engine as `Skipped` so they are logged and counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRecord {
    Track(TrackDescriptor),
    Skipped(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateKind {
    Song,
    Video,
}

/// A song or video returned by the YouTube Music search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTrack {
    /// The YouTube video id, used for playlist insertion and rating.
    pub id: String,
    pub title: String,
    /// Primary artist, empty when the service did not report one.
    pub artist: String,
    pub album: Option<String>,
    pub kind: CandidateKind,
}

impl fmt::Display for CandidateTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artist = if self.artist.is_empty() {
            "<Unknown>"
        } else {
            self.artist.as_str()
        };
        write!(
            f,
            "{} - {} - {}",
            self.title,
            artist,
            self.album.as_deref().unwrap_or("<Unknown>")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub browse_id: String,
    pub title: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchAlgorithm {
    /// Take the first song search result
    #[value(alias = "0")]
    Exact,
    /// Require title, artist and album to match exactly
    #[value(alias = "1")]
    Strict,
    /// Loose title comparison with a video search as last resort
    #[value(alias = "2")]
    Fuzzy,
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchAlgorithm::Exact => "exact",
            SearchAlgorithm::Strict => "strict",
            SearchAlgorithm::Fuzzy => "fuzzy",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Privacy {
    #[default]
    Private,
    Public,
    Unlisted,
}

impl Privacy {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Privacy::Private => "PRIVATE",
            Privacy::Public => "PUBLIC",
            Privacy::Unlisted => "UNLISTED",
        }
    }
}

/// Where the transfer engine writes resolved tracks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Rate every track with a like.
    LikedSongs,
    /// Append to an existing playlist.
    Playlist(String),
    /// A playlist that would be created; only produced in dry-run mode.
    Planned(String),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::LikedSongs => write!(f, "Liked Songs"),
            Destination::Playlist(id) => write!(f, "playlist {}", id),
            Destination::Planned(name) => write!(f, "new playlist '{}' (dry run)", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferSummary {
    pub added: usize,
    pub duplicates: usize,
    pub errors: usize,
    pub skipped: usize,
}

impl fmt::Display for TransferSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added {} tracks, encountered {} duplicates, {} errors, {} skipped",
            self.added, self.duplicates, self.errors, self.skipped
        )
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub tracks: usize,
    pub id: String,
}

#[derive(Tabled)]
pub struct CandidateTableRow {
    pub kind: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub id: String,
}

impl From<&CandidateTrack> for CandidateTableRow {
    fn from(track: &CandidateTrack) -> Self {
        let kind = match track.kind {
            CandidateKind::Song => "song",
            CandidateKind::Video => "video",
        };
        Self {
            kind: kind.to_string(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone().unwrap_or_default(),
            id: track.id.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct PlaylistReportRow {
    pub playlist: String,
    pub added: usize,
    pub duplicates: usize,
    pub errors: usize,
    pub skipped: usize,
}
