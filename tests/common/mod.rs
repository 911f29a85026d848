#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use spotify2ytmusic::{
    types::{AlbumSummary, CandidateKind, CandidateTrack, PlaylistSummary, Privacy},
    ytmusic::{MusicService, ServiceError},
};

pub fn song(id: &str, title: &str, artist: &str, album: &str) -> CandidateTrack {
    CandidateTrack {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: Some(album.to_string()),
        kind: CandidateKind::Song,
    }
}

pub fn video(id: &str, title: &str, artist: &str) -> CandidateTrack {
    CandidateTrack {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        album: None,
        kind: CandidateKind::Video,
    }
}

pub fn album(browse_id: &str, title: &str, artist: &str) -> AlbumSummary {
    AlbumSummary {
        browse_id: browse_id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
    }
}

/// In-memory music service. Search answers are keyed by the exact query;
/// every call is recorded.
#[derive(Default)]
pub struct FakeMusicService {
    albums: HashMap<String, Vec<AlbumSummary>>,
    album_tracks: HashMap<String, Vec<CandidateTrack>>,
    songs: HashMap<String, Vec<CandidateTrack>>,
    videos: HashMap<String, Vec<CandidateTrack>>,
    suggestions: HashMap<String, Vec<String>>,
    playlists: Mutex<Vec<PlaylistSummary>>,
    write_failures: Mutex<usize>,
    create_failures: Mutex<usize>,
    list_fails: bool,
    album_search_fails: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeMusicService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_albums(mut self, query: &str, albums: Vec<AlbumSummary>) -> Self {
        self.albums.insert(query.to_string(), albums);
        self
    }

    pub fn with_album_tracks(mut self, browse_id: &str, tracks: Vec<CandidateTrack>) -> Self {
        self.album_tracks.insert(browse_id.to_string(), tracks);
        self
    }

    pub fn with_songs(mut self, query: &str, songs: Vec<CandidateTrack>) -> Self {
        self.songs.insert(query.to_string(), songs);
        self
    }

    pub fn with_videos(mut self, query: &str, videos: Vec<CandidateTrack>) -> Self {
        self.videos.insert(query.to_string(), videos);
        self
    }

    pub fn with_suggestions(mut self, query: &str, suggestions: &[&str]) -> Self {
        let suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        self.suggestions.insert(query.to_string(), suggestions);
        self
    }

    pub fn with_playlist(self, id: &str, title: &str) -> Self {
        self.playlists.lock().unwrap().push(PlaylistSummary {
            id: id.to_string(),
            title: title.to_string(),
        });
        self
    }

    /// The next `n` appends/likes fail.
    pub fn failing_writes(self, n: usize) -> Self {
        *self.write_failures.lock().unwrap() = n;
        self
    }

    /// The next `n` playlist creations fail.
    pub fn failing_creates(self, n: usize) -> Self {
        *self.create_failures.lock().unwrap() = n;
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.list_fails = true;
        self
    }

    /// Every album search fails.
    pub fn failing_album_search(mut self) -> Self {
        self.album_search_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn consume_failure(counter: &Mutex<usize>) -> bool {
        let mut remaining = counter.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl MusicService for FakeMusicService {
    async fn search_albums(&self, query: &str) -> Result<Vec<AlbumSummary>, ServiceError> {
        self.record(format!("search_albums:{}", query));
        if self.album_search_fails {
            return Err(ServiceError::Api("album search failed".into()));
        }
        Ok(self.albums.get(query).cloned().unwrap_or_default())
    }

    async fn search_songs(&self, query: &str) -> Result<Vec<CandidateTrack>, ServiceError> {
        self.record(format!("search_songs:{}", query));
        Ok(self.songs.get(query).cloned().unwrap_or_default())
    }

    async fn search_videos(&self, query: &str) -> Result<Vec<CandidateTrack>, ServiceError> {
        self.record(format!("search_videos:{}", query));
        Ok(self.videos.get(query).cloned().unwrap_or_default())
    }

    async fn get_album_tracks(&self, browse_id: &str) -> Result<Vec<CandidateTrack>, ServiceError> {
        self.record(format!("get_album:{}", browse_id));
        self.album_tracks
            .get(browse_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("album {}", browse_id)))
    }

    async fn search_suggestions(&self, query: &str) -> Result<Vec<String>, ServiceError> {
        self.record(format!("search_suggestions:{}", query));
        Ok(self.suggestions.get(query).cloned().unwrap_or_default())
    }

    async fn create_playlist(
        &self,
        title: &str,
        _description: &str,
        privacy: Privacy,
    ) -> Result<String, ServiceError> {
        self.record(format!("create:{}:{}", title, privacy.as_api_str()));
        if Self::consume_failure(&self.create_failures) {
            return Err(ServiceError::Api("create failed".into()));
        }
        let mut playlists = self.playlists.lock().unwrap();
        let id = format!("PL{}", playlists.len() + 1);
        playlists.push(PlaylistSummary {
            id: id.clone(),
            title: title.to_string(),
        });
        Ok(id)
    }

    async fn append_to_playlist(
        &self,
        playlist_id: &str,
        track_id: &str,
    ) -> Result<(), ServiceError> {
        self.record(format!("append:{}:{}", playlist_id, track_id));
        if Self::consume_failure(&self.write_failures) {
            return Err(ServiceError::Api("append failed".into()));
        }
        Ok(())
    }

    async fn like_track(&self, track_id: &str) -> Result<(), ServiceError> {
        self.record(format!("like:{}", track_id));
        if Self::consume_failure(&self.write_failures) {
            return Err(ServiceError::Api("like failed".into()));
        }
        Ok(())
    }

    async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>, ServiceError> {
        self.record("list_playlists".to_string());
        if self.list_fails {
            return Err(ServiceError::Api("listing failed".into()));
        }
        Ok(self.playlists.lock().unwrap().clone())
    }

    async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistSummary, ServiceError> {
        self.record(format!("get_playlist:{}", playlist_id));
        self.playlists
            .lock()
            .unwrap()
            .iter()
            .find(|pl| pl.id == playlist_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("playlist {}", playlist_id)))
    }
}
