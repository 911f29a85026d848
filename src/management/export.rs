use std::{fmt, io::Error, path::Path};

use serde::Deserialize;
use serde_json::Value;

use crate::types::{SourceRecord, TrackDescriptor};

/// Name of the pseudo-playlist holding the liked songs in the export.
pub const LIKED_SONGS: &str = "Liked Songs";

#[derive(Debug)]
pub enum SourceError {
    IoError(Error),
    SerdeError(serde_json::Error),
    PlaylistNotFound(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::IoError(e) => write!(f, "cannot read Spotify export: {}", e),
            SourceError::SerdeError(e) => write!(f, "invalid Spotify export: {}", e),
            SourceError::PlaylistNotFound(id) => {
                write!(f, "could not find Spotify playlist {}", id)
            }
        }
    }
}

impl std::error::Error for SourceError {}

impl From<Error> for SourceError {
    fn from(err: Error) -> Self {
        SourceError::IoError(err)
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::SerdeError(err)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Raw playlist entries; each is validated when iterated.
    #[serde(default)]
    pub tracks: Vec<Value>,
}

impl SpotifyPlaylist {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn is_liked_songs(&self) -> bool {
        self.name() == LIKED_SONGS
    }

    /// Entries of the playlist as source records.
    ///
    /// The export lists the most recently added tracks first; with `reverse`
    /// the oldest track comes first so the destination ends up in the same
    /// order as the source.
    pub fn records(&self, reverse: bool) -> impl Iterator<Item = SourceRecord> + '_ {
        let entries: Box<dyn Iterator<Item = &Value> + '_> = if reverse {
            Box::new(self.tracks.iter().rev())
        } else {
            Box::new(self.tracks.iter())
        };

        entries.map(playlist_entry_record)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpotifyExport {
    #[serde(default)]
    pub playlists: Vec<SpotifyPlaylist>,
    /// Saved albums, as `{"album": {...}}` entries.
    #[serde(default)]
    pub albums: Vec<Value>,
}

impl SpotifyExport {
    pub async fn load(path: &Path) -> Result<Self, SourceError> {
        let content = async_fs::read_to_string(path).await?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn playlists(&self) -> &[SpotifyPlaylist] {
        &self.playlists
    }

    /// Finds a playlist by id, or the liked-songs pseudo-playlist for `None`.
    pub fn find_playlist(
        &self,
        playlist_id: Option<&str>,
    ) -> Result<&SpotifyPlaylist, SourceError> {
        self.playlists
            .iter()
            .find(|pl| match playlist_id {
                None => pl.is_liked_songs(),
                Some(id) => pl.id() == id,
            })
            .ok_or_else(|| {
                SourceError::PlaylistNotFound(playlist_id.unwrap_or(LIKED_SONGS).to_string())
            })
    }

    /// First playlist whose name is exactly `name`.
    pub fn find_playlist_by_name(&self, name: &str) -> Result<&SpotifyPlaylist, SourceError> {
        self.playlists
            .iter()
            .find(|pl| pl.name() == name)
            .ok_or_else(|| SourceError::PlaylistNotFound(name.to_string()))
    }

    /// Tracks of a playlist (`None` for liked songs), see
    /// [`SpotifyPlaylist::records`].
    pub fn playlist_tracks(
        &self,
        playlist_id: Option<&str>,
        reverse: bool,
    ) -> Result<impl Iterator<Item = SourceRecord> + '_, SourceError> {
        Ok(self.find_playlist(playlist_id)?.records(reverse))
    }

    /// Every track of every saved album.
    pub fn liked_album_tracks(&self) -> impl Iterator<Item = SourceRecord> + '_ {
        self.albums.iter().flat_map(saved_album_records)
    }
}

fn str_at<'a>(value: &'a Value, pointer: &str) -> Option<&'a str> {
    value.pointer(pointer).and_then(Value::as_str)
}

fn playlist_entry_record(entry: &Value) -> SourceRecord {
    let Some(track) = entry.get("track").filter(|t| !t.is_null()) else {
        return SourceRecord::Skipped(format!("playlist entry without track: {}", entry));
    };

    match (
        str_at(track, "/name"),
        str_at(track, "/artists/0/name"),
        str_at(track, "/album/name"),
    ) {
        (Some(title), Some(artist), Some(album)) => {
            SourceRecord::Track(TrackDescriptor::new(title, artist, album))
        }
        _ => SourceRecord::Skipped(format!("malformed track: {}", track)),
    }
}

fn saved_album_records(entry: &Value) -> Vec<SourceRecord> {
    let Some(album) = entry.get("album").filter(|a| a.is_object()) else {
        return vec![SourceRecord::Skipped(format!("saved album entry without album: {}", entry))];
    };
    let Some(album_name) = str_at(album, "/name") else {
        return vec![SourceRecord::Skipped(format!("album without name: {}", album))];
    };

    album
        .pointer("/tracks/items")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .map(|track| match (str_at(track, "/name"), str_at(track, "/artists/0/name")) {
            (Some(title), Some(artist)) => {
                SourceRecord::Track(TrackDescriptor::new(title, artist, album_name))
            }
            _ => SourceRecord::Skipped(format!("malformed album track: {}", track)),
        })
        .collect()
}
