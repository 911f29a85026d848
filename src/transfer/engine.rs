use std::time::Duration;

use tokio::time::sleep;

use crate::{
    info,
    management::{SpotifyExport, SpotifyPlaylist},
    matcher::Matcher,
    success,
    transfer::{RetryPolicy, TransferError, TransferSession},
    types::{
        CandidateTrack, Destination, Privacy, SearchAlgorithm, SourceRecord, TransferSummary,
    },
    warning,
    ytmusic::{MusicService, ServiceError},
};

#[derive(Debug, Clone)]
pub struct TransferOptions {
    pub algorithm: SearchAlgorithm,
    /// Resolve and count, but never write to the account.
    pub dry_run: bool,
    /// Pause after each written track.
    pub track_sleep: Duration,
    /// Pause after a playlist was created, before its id is used.
    pub settle_delay: Duration,
    /// Pause between two playlists of a batch copy.
    pub playlist_sleep: Duration,
    pub retry: RetryPolicy,
    pub privacy: Privacy,
    /// Copy playlists oldest track first.
    pub reverse: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::Exact,
            dry_run: false,
            track_sleep: Duration::from_millis(100),
            settle_delay: Duration::from_secs(1),
            playlist_sleep: Duration::from_secs(2),
            retry: RetryPolicy::default(),
            privacy: Privacy::Private,
            reverse: true,
        }
    }
}

/// Outcome of one playlist of a bulk copy. `summary` is `None` when the
/// playlist could not be copied at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistReport {
    pub name: String,
    pub summary: Option<TransferSummary>,
}

pub struct TransferEngine<'a, S: MusicService + ?Sized> {
    service: &'a S,
    matcher: Matcher<'a, S>,
    options: TransferOptions,
}

impl<'a, S: MusicService + ?Sized> TransferEngine<'a, S> {
    pub fn new(service: &'a S, options: TransferOptions) -> Self {
        Self {
            service,
            matcher: Matcher::new(service),
            options,
        }
    }

    /// Resolves and writes every record, in order. A record that cannot be
    /// resolved or written is counted and the run goes on.
    pub async fn transfer<I>(&self, records: I, destination: &Destination) -> TransferSummary
    where
        I: IntoIterator<Item = SourceRecord>,
    {
        let mut session = TransferSession::new();

        for record in records {
            let track = match record {
                SourceRecord::Track(track) => track,
                SourceRecord::Skipped(reason) => {
                    warning!("Spotify track seems to be malformed, skipping. {}", reason);
                    session.record_skipped();
                    continue;
                }
            };

            info!("Spotify:   {}", track);
            let found = match self.matcher.resolve(&track, self.options.algorithm).await {
                Ok(found) => found,
                Err(e) => {
                    warning!("Unable to look up song on YTMusic: {}", e);
                    session.record_error();
                    continue;
                }
            };
            info!("  Youtube: {}", found);

            if session.is_duplicate(&found.id) {
                warning!("(DUPLICATE, this track has already been added)");
                session.record_duplicate();
            }

            if !self.options.dry_run {
                if let Err(e) = self.write(&found, destination).await {
                    warning!("Unable to add {} to {}: {}", found.id, destination, e);
                    session.record_error();
                    self.pace().await;
                    continue;
                }
            }

            session.record_added(&found.id);
            self.pace().await;
        }

        let summary = session.summary();
        success!("{}", summary);
        summary
    }

    async fn write(
        &self,
        track: &CandidateTrack,
        destination: &Destination,
    ) -> Result<(), ServiceError> {
        let retry = &self.options.retry;
        match destination {
            Destination::LikedSongs => {
                let label = format!("like_track: {}", track.id);
                retry
                    .run(&label, || self.service.like_track(&track.id))
                    .await
            }
            Destination::Playlist(playlist_id) => {
                let label = format!("add_playlist_items: {} {}", playlist_id, track.id);
                retry
                    .run(&label, || {
                        self.service.append_to_playlist(playlist_id, &track.id)
                    })
                    .await
            }
            Destination::Planned(name) => Err(ServiceError::NotFound(format!(
                "playlist '{}' was never created",
                name
            ))),
        }
    }

    async fn pace(&self) {
        if !self.options.track_sleep.is_zero() {
            sleep(self.options.track_sleep).await;
        }
    }

    /// Id of the first library playlist whose title is exactly `title`.
    pub async fn find_playlist_by_name(
        &self,
        title: &str,
    ) -> Result<Option<String>, TransferError> {
        let playlists = self
            .service
            .list_playlists()
            .await
            .map_err(TransferError::Lookup)?;

        Ok(playlists
            .into_iter()
            .find(|pl| pl.title == title)
            .map(|pl| pl.id))
    }

    /// Creates a playlist under the retry policy and waits for it to settle.
    pub async fn create_playlist(
        &self,
        title: &str,
        description: &str,
    ) -> Result<String, TransferError> {
        let label = format!("create_playlist: {}", title);
        let privacy = self.options.privacy;
        let playlist_id = self
            .options
            .retry
            .run(&label, || {
                self.service.create_playlist(title, description, privacy)
            })
            .await
            .map_err(|source| TransferError::PlaylistCreation {
                title: title.to_string(),
                source,
            })?;

        // the new id is not usable right away
        if !self.options.settle_delay.is_zero() {
            sleep(self.options.settle_delay).await;
        }

        Ok(playlist_id)
    }

    async fn create_destination(&self, name: &str) -> Result<Destination, TransferError> {
        if self.options.dry_run {
            info!("Dry run, not creating playlist '{}'", name);
            return Ok(Destination::Planned(name.to_string()));
        }

        let playlist_id = self.create_playlist(name, name).await?;
        info!("Created playlist '{}' with ID: {}", name, playlist_id);
        Ok(Destination::Playlist(playlist_id))
    }

    /// Looks a playlist up by title and creates it when absent.
    pub async fn resolve_destination_by_name(
        &self,
        name: &str,
    ) -> Result<Destination, TransferError> {
        let existing = self.find_playlist_by_name(name).await?;
        info!(
            "Looking up playlist '{}': id={}",
            name,
            existing.as_deref().unwrap_or("None")
        );

        match existing {
            Some(playlist_id) => Ok(Destination::Playlist(playlist_id)),
            None => self.create_destination(name).await,
        }
    }

    /// Checks that a playlist given by id exists.
    pub async fn verify_playlist(&self, playlist_id: &str) -> Result<Destination, TransferError> {
        let playlist = self
            .service
            .get_playlist(playlist_id)
            .await
            .map_err(|source| TransferError::PlaylistNotFound {
                id: playlist_id.to_string(),
                source,
            })?;
        info!("== Youtube Playlist: {}", playlist.title);
        Ok(Destination::Playlist(playlist.id))
    }

    /// Destination of a single playlist copy.
    ///
    /// - `+<name>`: the playlist titled `<name>`, created when absent
    /// - empty: a new playlist named after the Spotify playlist
    /// - anything else: the id of an existing playlist
    pub async fn resolve_copy_destination(
        &self,
        export: &SpotifyExport,
        spotify_playlist_id: &str,
        target: &str,
    ) -> Result<Destination, TransferError> {
        if let Some(name) = target.strip_prefix('+').filter(|n| !n.is_empty()) {
            return self.resolve_destination_by_name(name).await;
        }

        if target.trim_start_matches('+').trim().is_empty() {
            info!("No playlist name or ID provided, creating playlist...");
            let name = export
                .find_playlist(Some(spotify_playlist_id))
                .ok()
                .map(|pl| pl.name().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("Spotify Playlist {}", spotify_playlist_id));
            return self.create_destination(&name).await;
        }

        self.verify_playlist(target).await
    }

    /// Copies one Spotify playlist, see [`TransferEngine::resolve_copy_destination`].
    pub async fn copy_playlist(
        &self,
        export: &SpotifyExport,
        spotify_playlist_id: &str,
        target: &str,
    ) -> Result<TransferSummary, TransferError> {
        let playlist = export.find_playlist(Some(spotify_playlist_id))?;
        info!("== Spotify Playlist: {}", playlist.name());

        let destination = self
            .resolve_copy_destination(export, spotify_playlist_id, target)
            .await?;
        Ok(self
            .transfer(playlist.records(self.options.reverse), &destination)
            .await)
    }

    /// Likes every track of the "Liked Songs" pseudo-playlist.
    pub async fn copy_liked_songs(
        &self,
        export: &SpotifyExport,
    ) -> Result<TransferSummary, TransferError> {
        let records = export.playlist_tracks(None, self.options.reverse)?;
        Ok(self.transfer(records, &Destination::LikedSongs).await)
    }

    /// Likes every track of every saved album.
    pub async fn copy_liked_albums(&self, export: &SpotifyExport) -> TransferSummary {
        self.transfer(export.liked_album_tracks(), &Destination::LikedSongs)
            .await
    }

    /// Copies `playlist` into the YouTube Music playlist titled `name`.
    async fn copy_into_named(
        &self,
        playlist: &SpotifyPlaylist,
        name: &str,
    ) -> Result<TransferSummary, TransferError> {
        let destination = self.resolve_destination_by_name(name).await?;
        let summary = self
            .transfer(playlist.records(self.options.reverse), &destination)
            .await;
        success!("Playlist '{}' done!", name);
        Ok(summary)
    }

    /// Copies every playlist except "Liked Songs" into a playlist of the same
    /// name, one after the other.
    ///
    /// A playlist whose destination cannot be looked up is reported without a
    /// summary; a playlist that cannot be created stops the whole run.
    pub async fn copy_all(
        &self,
        export: &SpotifyExport,
    ) -> Result<Vec<PlaylistReport>, TransferError> {
        let mut reports = Vec::new();

        for playlist in export.playlists().iter().filter(|pl| !pl.is_liked_songs()) {
            let name = if playlist.name().is_empty() {
                format!("Unnamed Spotify Playlist {}", playlist.id())
            } else {
                playlist.name().to_string()
            };
            info!("== Spotify Playlist: {}", name);

            let summary = match self.copy_into_named(playlist, &name).await {
                Ok(summary) => Some(summary),
                Err(e @ TransferError::PlaylistCreation { .. }) => return Err(e),
                Err(e) => {
                    warning!("Skipping playlist '{}': {}", name, e);
                    None
                }
            };
            reports.push(PlaylistReport { name, summary });
        }

        Ok(reports)
    }

    /// Copies the Spotify playlists with the given names into playlists of the
    /// same names, pausing between two playlists.
    ///
    /// Every failure, including a playlist that cannot be created, only marks
    /// that playlist as failed.
    pub async fn copy_playlists_by_name(
        &self,
        export: &SpotifyExport,
        names: &[String],
    ) -> Vec<PlaylistReport> {
        let mut reports = Vec::with_capacity(names.len());

        for (i, name) in names.iter().enumerate() {
            info!("[{}/{}] Processing: {}", i + 1, names.len(), name);

            let copied = match export.find_playlist_by_name(name) {
                Ok(playlist) => self.copy_into_named(playlist, name).await,
                Err(e) => Err(e.into()),
            };
            let summary = match copied {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warning!("{} failed: {}", name, e);
                    None
                }
            };
            reports.push(PlaylistReport {
                name: name.clone(),
                summary,
            });

            if i + 1 < names.len() && !self.options.playlist_sleep.is_zero() {
                sleep(self.options.playlist_sleep).await;
            }
        }

        reports
    }
}
