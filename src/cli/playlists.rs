use std::path::PathBuf;

use tabled::Table;

use crate::{
    cli::{connect, load_export},
    error, success,
    transfer::{TransferEngine, TransferOptions},
    types::{PlaylistTableRow, Privacy},
    warning,
};

pub async fn list_playlists(playlists_file: Option<PathBuf>) {
    let export = load_export(playlists_file).await;

    if export.playlists().is_empty() {
        warning!("No playlists found");
        return;
    }

    let rows: Vec<PlaylistTableRow> = export
        .playlists()
        .iter()
        .map(|pl| PlaylistTableRow {
            name: pl.name().to_string(),
            tracks: pl.tracks.len(),
            id: pl.id().to_string(),
        })
        .collect();

    let count = rows.len();
    println!("{}", Table::new(rows));
    println!("Total: {} playlists", count);
}

pub async fn create_playlist(name: String, privacy: Privacy) {
    if name.trim().is_empty() {
        error!("Playlist name cannot be empty");
    }

    let client = connect().await;
    let options = TransferOptions {
        privacy,
        ..TransferOptions::default()
    };
    let engine = TransferEngine::new(&client, options);

    match engine.create_playlist(&name, &name).await {
        Ok(playlist_id) => success!("Playlist ID: {}", playlist_id),
        Err(e) => error!("{}", e),
    }
}
