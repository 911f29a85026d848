use tabled::Table;

use crate::{
    cli::connect,
    info,
    matcher::{Matcher, SearchDetails},
    types::{CandidateTableRow, SearchAlgorithm, TrackDescriptor},
    warning,
};

/// Resolves a single track the way a transfer would, and shows what the song
/// search looked at.
pub async fn search(title: String, artist: String, album: String, algorithm: SearchAlgorithm) {
    let client = connect().await;
    let matcher = Matcher::new(&client);
    let track = TrackDescriptor {
        title,
        artist,
        album,
    };

    let mut details = SearchDetails::default();
    match matcher
        .resolve_with_details(&track, algorithm, &mut details)
        .await
    {
        Ok(found) => println!("{}", Table::new([CandidateTableRow::from(&found)])),
        Err(e) => warning!("{} (algorithm: {})", e, algorithm),
    }

    let Some(query) = details.query else {
        info!("Found in the album of the track, no song search needed");
        return;
    };

    info!("Query: {}", query);
    if !details.suggestions.is_empty() {
        info!("Suggestions: {}", details.suggestions.join(", "));
    }

    let rows: Vec<CandidateTableRow> = details.songs.iter().map(CandidateTableRow::from).collect();
    println!("{}", Table::new(rows));
}
