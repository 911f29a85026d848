mod credentials;
mod export;

pub use credentials::CredentialsManager;
pub use credentials::OAuthCredentials;
pub use export::LIKED_SONGS;
pub use export::SourceError;
pub use export::SpotifyExport;
pub use export::SpotifyPlaylist;
