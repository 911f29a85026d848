//! # Transfer Module
//!
//! Writes resolved tracks to YouTube Music.
//!
//! - [`RetryPolicy`] - the bounded exponential backoff shared by playlist
//!   creation and track writes
//! - [`TransferSession`] - de-duplication set and counters of one run
//! - [`TransferEngine`] - resolves each source record through the
//!   [`crate::matcher::Matcher`], writes it, and reports a
//!   [`crate::types::TransferSummary`]; also resolves or creates destination
//!   playlists and drives the bulk copy of every playlist.
//!
//! Everything runs sequentially: a track is resolved and written before the
//! next one is looked at.

use std::fmt;

use crate::{management::SourceError, ytmusic::ServiceError};

mod engine;
mod retry;
mod session;

pub use engine::PlaylistReport;
pub use engine::TransferEngine;
pub use engine::TransferOptions;
pub use retry::RetryPolicy;
pub use session::TransferSession;

#[derive(Debug)]
pub enum TransferError {
    /// Playlist creation failed on every attempt.
    PlaylistCreation { title: String, source: ServiceError },
    /// The destination playlist given by id does not resolve.
    PlaylistNotFound { id: String, source: ServiceError },
    /// Reading the library playlists failed.
    Lookup(ServiceError),
    Source(SourceError),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::PlaylistCreation { title, source } => write!(
                f,
                "could not create playlist \"{}\" after multiple retries: {}",
                title, source
            ),
            TransferError::PlaylistNotFound { id, source } => {
                write!(f, "unable to find YTMusic playlist {}: {}", id, source)
            }
            TransferError::Lookup(e) => write!(f, "unable to list YTMusic playlists: {}", e),
            TransferError::Source(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<SourceError> for TransferError {
    fn from(err: SourceError) -> Self {
        TransferError::Source(err)
    }
}
