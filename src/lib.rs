//! Spotify to YouTube Music migration library
//!
//! This library copies playlists and liked songs from a Spotify export file
//! (`playlists.json`) to a YouTube Music account. It includes the song matcher
//! that reconciles a Spotify track with YouTube Music search results, the
//! transfer engine that writes the matches with bounded retries, and the glue
//! needed by the command-line interface.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Loading of the Spotify export and the YouTube Music credentials
//! - `matcher` - Resolution of Spotify tracks to YouTube Music tracks
//! - `transfer` - Retry policy, transfer sessions and the transfer engine
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `ytmusic` - YouTube Music client and the `MusicService` capability trait
//!
//! # Example
//!
//! ```
//! use spotify2ytmusic::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> spotify2ytmusic::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod management;
pub mod matcher;
pub mod transfer;
pub mod types;
pub mod utils;
pub mod ytmusic;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the glue code of the application where the concrete error type
/// does not matter to the caller. Keeps `Send + Sync` bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Looking up playlist '{}'", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Added {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for unrecoverable configuration faults (missing credential
/// file, unreadable export). Code after this macro does not execute.
///
/// # Example
///
/// ```
/// error!("No file '{}' exists", path);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a track that could not be found or a
/// remote call that is about to be retried.
///
/// # Example
///
/// ```
/// warning!("Unable to look up song on YTMusic: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
