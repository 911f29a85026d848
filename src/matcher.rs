//! Resolution of Spotify tracks to YouTube Music tracks.
//!
//! Every lookup first tries the album the track belongs to: the top album
//! results for `"<album> by <artist>"` are opened and a track with exactly the
//! same title is taken. Without such a hit a song search for
//! `"<title> by <artist>"` is run and one of the [`SearchAlgorithm`]s picks the
//! result:
//!
//! - `Exact` trusts the search ranking and takes the first song.
//! - `Strict` wants title, primary artist and album to be identical.
//! - `Fuzzy` compares titles without their `(...)`/`[...]` parts and accepts
//!   substrings, then falls back to a video search when even the first song
//!   looks wrong.

use std::fmt;

use crate::{
    types::{CandidateTrack, SearchAlgorithm, TrackDescriptor},
    utils, warning,
    ytmusic::{MusicService, ServiceError},
};

/// Number of album search results opened by the album-scoped lookup.
const ALBUMS_TO_INSPECT: usize = 3;

#[derive(Debug)]
pub enum MatchError {
    NotFound(TrackDescriptor),
    Service(ServiceError),
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::NotFound(track) => write!(
                f,
                "did not find {} by {} from {}",
                track.title, track.artist, track.album
            ),
            MatchError::Service(e) => write!(f, "search failed: {}", e),
        }
    }
}

impl std::error::Error for MatchError {}

impl From<ServiceError> for MatchError {
    fn from(err: ServiceError) -> Self {
        MatchError::Service(err)
    }
}

/// What the song search of a lookup looked at.
///
/// Stays empty when the album-scoped lookup already found the track.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchDetails {
    pub query: Option<String>,
    pub songs: Vec<CandidateTrack>,
    pub suggestions: Vec<String>,
}

pub struct Matcher<'a, S: MusicService + ?Sized> {
    service: &'a S,
}

impl<'a, S: MusicService + ?Sized> Matcher<'a, S> {
    pub fn new(service: &'a S) -> Self {
        Self { service }
    }

    pub async fn resolve(
        &self,
        track: &TrackDescriptor,
        algorithm: SearchAlgorithm,
    ) -> Result<CandidateTrack, MatchError> {
        self.lookup(track, algorithm, None).await
    }

    /// Like [`Matcher::resolve`], and records the song query, its results and
    /// the search suggestions for it in `details`.
    pub async fn resolve_with_details(
        &self,
        track: &TrackDescriptor,
        algorithm: SearchAlgorithm,
        details: &mut SearchDetails,
    ) -> Result<CandidateTrack, MatchError> {
        self.lookup(track, algorithm, Some(details)).await
    }

    async fn lookup(
        &self,
        track: &TrackDescriptor,
        algorithm: SearchAlgorithm,
        details: Option<&mut SearchDetails>,
    ) -> Result<CandidateTrack, MatchError> {
        if let Some(hit) = self.lookup_in_album(track).await? {
            return Ok(hit);
        }

        let query = format!("{} by {}", track.title, track.artist);
        let suggestions = match details {
            Some(_) => self.service.search_suggestions(&query).await?,
            None => Vec::new(),
        };
        let songs = self.service.search_songs(&query).await?;

        if let Some(details) = details {
            details.query = Some(query.clone());
            details.songs = songs.clone();
            details.suggestions = suggestions;
        }

        match algorithm {
            SearchAlgorithm::Exact => songs
                .into_iter()
                .next()
                .ok_or_else(|| MatchError::NotFound(track.clone())),
            SearchAlgorithm::Strict => songs
                .into_iter()
                .find(|song| is_strict_match(song, track))
                .ok_or_else(|| MatchError::NotFound(track.clone())),
            SearchAlgorithm::Fuzzy => self.resolve_fuzzy(track, &query, songs).await,
        }
    }

    async fn lookup_in_album(
        &self,
        track: &TrackDescriptor,
    ) -> Result<Option<CandidateTrack>, MatchError> {
        let query = format!("{} by {}", track.album, track.artist);
        let albums = self.service.search_albums(&query).await?;

        for album in albums.iter().take(ALBUMS_TO_INSPECT) {
            match self.service.get_album_tracks(&album.browse_id).await {
                Ok(tracks) => {
                    if let Some(hit) = tracks.into_iter().find(|t| t.title == track.title) {
                        return Ok(Some(hit));
                    }
                }
                Err(e) => warning!(
                    "Unable to lookup album {} by {} ({}), continuing...",
                    album.title,
                    album.artist,
                    e
                ),
            }
        }

        Ok(None)
    }

    async fn resolve_fuzzy(
        &self,
        track: &TrackDescriptor,
        query: &str,
        songs: Vec<CandidateTrack>,
    ) -> Result<CandidateTrack, MatchError> {
        if let Some(song) = songs.iter().find(|song| is_fuzzy_match(song, track)) {
            return Ok(song.clone());
        }

        match songs.into_iter().next() {
            Some(first) if !is_poor_first_result(&first, track) => Ok(first),
            _ => {
                warning!("Not found in songs, searching videos");
                let title = track.title.to_lowercase();
                self.service
                    .search_videos(query)
                    .await?
                    .into_iter()
                    .find(|video| video.title.to_lowercase().contains(&title))
                    .ok_or_else(|| MatchError::NotFound(track.clone()))
            }
        }
    }
}

pub fn is_strict_match(song: &CandidateTrack, track: &TrackDescriptor) -> bool {
    song.title == track.title
        && song.artist == track.artist
        && song.album.as_deref() == Some(track.album.as_str())
}

/// Title without brackets equal to, or a substring of / superstring of, the
/// searched title, and a primary artist containing the searched artist.
///
/// An identical title is accepted whether or not the album matches, so the
/// album does not take part in the decision.
pub fn is_fuzzy_match(song: &CandidateTrack, track: &TrackDescriptor) -> bool {
    let title = utils::strip_brackets(&song.title);

    // "(Intro)" strips down to nothing, which every title contains
    let title_matches = title == track.title
        || (!title.is_empty() && (track.title.contains(&title) || title.contains(&track.title)));
    let artist_matches = song.artist == track.artist || song.artist.contains(&track.artist);

    title_matches && artist_matches
}

/// The first raw result is "poor" when its title does not contain the
/// searched title (ignoring case) or its primary artist differs.
fn is_poor_first_result(first: &CandidateTrack, track: &TrackDescriptor) -> bool {
    !utils::contains_ignore_case(&first.title, &track.title) || first.artist != track.artist
}
