use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{cli::connect, error, info, success, ytmusic::MusicService};

/// Lists the library playlists to prove the credentials work.
pub async fn check() {
    let client = connect().await;

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching YTMusic library playlists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let playlists = client.list_playlists().await;
    pb.finish_and_clear();

    match playlists {
        Ok(playlists) => {
            success!("YTMusic connection successful");
            info!("Found {} playlists in library", playlists.len());
            for (i, pl) in playlists.iter().take(5).enumerate() {
                println!("  {}. {} ({})", i + 1, pl.title, pl.id);
            }
        }
        Err(e) => error!("YTMusic connection failed: {}", e),
    }
}
