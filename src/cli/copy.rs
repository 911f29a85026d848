use std::path::PathBuf;

use tabled::Table;

use crate::{
    cli::{connect, load_export},
    error, info, success,
    transfer::{PlaylistReport, TransferEngine, TransferError, TransferOptions},
    types::PlaylistReportRow,
    warning,
};

const PLAYLIST_ID_HINT: &str =
    "Make sure the YTMusic playlist ID is correct, it should be something like 'PL_DhcdsaJ7echjfdsaJFhdsWUd73HJFca'";

fn announce(options: &TransferOptions) {
    info!("Using search algorithm: {}", options.algorithm);
    if options.dry_run {
        warning!("Dry run, nothing will be written to YTMusic");
    }
}

pub async fn load_liked(playlists_file: Option<PathBuf>, options: TransferOptions) {
    let export = load_export(playlists_file).await;
    let client = connect().await;
    announce(&options);

    let engine = TransferEngine::new(&client, options);
    if let Err(e) = engine.copy_liked_songs(&export).await {
        error!("{}", e);
    }
}

pub async fn load_liked_albums(playlists_file: Option<PathBuf>, options: TransferOptions) {
    let export = load_export(playlists_file).await;
    if export.albums.is_empty() {
        warning!("No saved albums found in the Spotify export");
        return;
    }

    let client = connect().await;
    announce(&options);

    TransferEngine::new(&client, options)
        .copy_liked_albums(&export)
        .await;
}

pub async fn copy_playlist(
    spotify_playlist_id: String,
    ytmusic_playlist: String,
    playlists_file: Option<PathBuf>,
    options: TransferOptions,
) {
    let export = load_export(playlists_file).await;
    let client = connect().await;
    announce(&options);

    let engine = TransferEngine::new(&client, options);
    match engine
        .copy_playlist(&export, &spotify_playlist_id, &ytmusic_playlist)
        .await
    {
        Ok(_) => {}
        Err(e @ TransferError::PlaylistNotFound { .. }) => error!("{}\n{}", e, PLAYLIST_ID_HINT),
        Err(e) => error!("{}", e),
    }
}

pub async fn copy_all(playlists_file: Option<PathBuf>, options: TransferOptions) {
    let export = load_export(playlists_file).await;
    let client = connect().await;
    announce(&options);

    let engine = TransferEngine::new(&client, options);
    let reports = match engine.copy_all(&export).await {
        Ok(reports) => reports,
        Err(e) => error!("{}", e),
    };

    print_reports(reports);
}

/// Copies the named Spotify playlists, one after the other.
pub async fn copy_playlists(
    names: Vec<String>,
    playlists_file: Option<PathBuf>,
    options: TransferOptions,
) {
    let export = load_export(playlists_file).await;
    let client = connect().await;
    announce(&options);

    let reports = TransferEngine::new(&client, options)
        .copy_playlists_by_name(&export, &names)
        .await;
    print_reports(reports);
}

fn print_reports(reports: Vec<PlaylistReport>) {
    let failed = reports.iter().filter(|r| r.summary.is_none()).count();
    let rows: Vec<PlaylistReportRow> = reports
        .into_iter()
        .filter_map(|r| {
            r.summary.map(|s| PlaylistReportRow {
                playlist: r.name,
                added: s.added,
                duplicates: s.duplicates,
                errors: s.errors,
                skipped: s.skipped,
            })
        })
        .collect();

    println!("{}", Table::new(rows));
    if failed > 0 {
        warning!("{} playlists could not be copied", failed);
    }
    success!("All done!");
}
