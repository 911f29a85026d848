//! Parsing of InnerTube responses.
//!
//! InnerTube answers with deeply nested renderer objects. Only the few fields
//! the migration needs are extracted, through JSON pointers; anything that does
//! not have the expected shape is skipped instead of failing the whole
//! response, since the web client layout changes regularly.

use serde_json::Value;

use crate::{
    types::{AlbumSummary, CandidateKind, CandidateTrack, PlaylistSummary},
    utils,
    ytmusic::ServiceError,
};

const SEARCH_SECTIONS: &str =
    "/contents/tabbedSearchResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents";

const ALBUM_SHELVES: [&str; 2] = [
    "/contents/twoColumnBrowseResultsRenderer/secondaryContents/sectionListRenderer/contents/0/musicShelfRenderer/contents",
    "/contents/singleColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicShelfRenderer/contents",
];

const ALBUM_TITLES: [&str; 2] = [
    "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicResponsiveHeaderRenderer/title/runs/0/text",
    "/header/musicDetailHeaderRenderer/title/runs/0/text",
];

const ALBUM_ARTISTS: [&str; 2] = [
    "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicResponsiveHeaderRenderer/straplineTextOne/runs/0/text",
    "/header/musicDetailHeaderRenderer/subtitle/runs/2/text",
];

const PLAYLIST_TITLES: [&str; 4] = [
    "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicResponsiveHeaderRenderer/title/runs/0/text",
    "/contents/twoColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/musicEditablePlaylistDetailHeaderRenderer/header/musicResponsiveHeaderRenderer/title/runs/0/text",
    "/header/musicDetailHeaderRenderer/title/runs/0/text",
    "/header/musicEditablePlaylistDetailHeaderRenderer/header/musicDetailHeaderRenderer/title/runs/0/text",
];

const LIBRARY_GRID: &str =
    "/contents/singleColumnBrowseResultsRenderer/tabs/0/tabRenderer/content/sectionListRenderer/contents/0/gridRenderer";

fn first_str<'a>(value: &'a Value, pointers: &[&str]) -> Option<&'a str> {
    pointers
        .iter()
        .find_map(|p| value.pointer(p).and_then(Value::as_str))
}

/// Text runs of one flex column of a list row.
fn runs(item: &Value, column: usize) -> &[Value] {
    let pointer =
        format!("/flexColumns/{column}/musicResponsiveListItemFlexColumnRenderer/text/runs");
    item.pointer(&pointer)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn run_text(run: &Value) -> Option<&str> {
    run.get("text").and_then(Value::as_str)
}

fn run_browse_id(run: &Value) -> Option<&str> {
    run.pointer("/navigationEndpoint/browseEndpoint/browseId")
        .and_then(Value::as_str)
}

fn is_separator(text: &str) -> bool {
    matches!(text.trim(), "•" | "&" | "," | "")
}

/// Primary artist of a row: the first run linking to an artist channel, or
/// the first non-separator run when nothing is linked.
fn row_artist(runs: &[Value]) -> String {
    let linked = runs.iter().find(|r| is_artist_link(r));
    let unlinked = || runs.iter().find(|r| is_label(r));
    linked
        .or_else(unlinked)
        .and_then(run_text)
        .unwrap_or_default()
        .to_string()
}

fn is_artist_link(run: &Value) -> bool {
    run_browse_id(run).is_some_and(|id| id.starts_with("UC"))
}

fn is_label(run: &Value) -> bool {
    run_text(run).is_some_and(|t| !is_separator(t))
}

fn row_album(runs: &[Value]) -> Option<String> {
    runs.iter()
        .find(|r| run_browse_id(r).is_some_and(|id| id.starts_with("MPRE")))
        .and_then(run_text)
        .map(str::to_string)
}

fn row_video_id(item: &Value) -> Option<&str> {
    first_str(
        item,
        &[
            "/playlistItemData/videoId",
            "/flexColumns/0/musicResponsiveListItemFlexColumnRenderer/text/runs/0/navigationEndpoint/watchEndpoint/videoId",
            "/overlay/musicItemThumbnailOverlayRenderer/content/musicPlayButtonRenderer/playNavigationEndpoint/watchEndpoint/videoId",
        ],
    )
}

fn shelf_items<'a>(shelf: Option<&'a Value>) -> impl Iterator<Item = &'a Value> {
    shelf
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get("musicResponsiveListItemRenderer"))
}

fn search_items(response: &Value) -> Vec<&Value> {
    response
        .pointer(SEARCH_SECTIONS)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .flat_map(|section| shelf_items(section.pointer("/musicShelfRenderer/contents")))
        .collect()
}

/// A song or video row. Rows without a video id are unplayable and skipped.
fn parse_track_row(item: &Value, kind: CandidateKind) -> Option<CandidateTrack> {
    let id = row_video_id(item)?;
    let title = runs(item, 0).first().and_then(run_text)?;
    let details = runs(item, 1);

    Some(CandidateTrack {
        id: id.to_string(),
        title: title.to_string(),
        artist: row_artist(details),
        album: match kind {
            CandidateKind::Song => row_album(details),
            CandidateKind::Video => None,
        },
        kind,
    })
}

/// Songs of a search filtered on songs, in ranking order.
pub fn parse_search_songs(response: &Value) -> Vec<CandidateTrack> {
    search_items(response)
        .into_iter()
        .filter_map(|item| parse_track_row(item, CandidateKind::Song))
        .collect()
}

/// Videos of a search filtered on videos, in ranking order.
pub fn parse_search_videos(response: &Value) -> Vec<CandidateTrack> {
    search_items(response)
        .into_iter()
        .filter_map(|item| parse_track_row(item, CandidateKind::Video))
        .collect()
}

/// Albums of a search filtered on albums. The artist is the first linked
/// channel, or the third run of `Album • <artist> • <year>`.
pub fn parse_search_albums(response: &Value) -> Vec<AlbumSummary> {
    search_items(response)
        .into_iter()
        .filter_map(|item| {
            let browse_id = item
                .pointer("/navigationEndpoint/browseEndpoint/browseId")
                .and_then(Value::as_str)?;
            let title = runs(item, 0).first().and_then(run_text)?;
            let details = runs(item, 1);
            // "Album • <artist> • <year>" when the artist is not linked
            let artist = details
                .iter()
                .find(|r| is_artist_link(r))
                .or_else(|| details.get(2))
                .and_then(run_text)
                .unwrap_or_default();

            Some(AlbumSummary {
                browse_id: browse_id.to_string(),
                title: title.to_string(),
                artist: artist.to_string(),
            })
        })
        .collect()
}

/// Suggestions of `music/get_search_suggestions`, history entries included.
pub fn parse_search_suggestions(response: &Value) -> Vec<String> {
    response
        .pointer("/contents/0/searchSuggestionsSectionRenderer/contents")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| {
            entry
                .get("searchSuggestionRenderer")
                .or_else(|| entry.get("historySuggestionRenderer"))
        })
        .filter_map(|r| r.pointer("/suggestion/runs").and_then(Value::as_array))
        .map(|runs| runs.iter().filter_map(run_text).collect::<String>())
        .filter(|suggestion| !suggestion.is_empty())
        .collect()
}

/// Tracks of an album page. Rows without a video id (unavailable tracks) are
/// left out.
pub fn parse_album_tracks(response: &Value) -> Result<Vec<CandidateTrack>, ServiceError> {
    let shelf = ALBUM_SHELVES
        .iter()
        .find_map(|p| response.pointer(p))
        .ok_or_else(|| ServiceError::Parse("album page has no track list".into()))?;

    let album_title = first_str(response, &ALBUM_TITLES).map(str::to_string);
    let album_artist = first_str(response, &ALBUM_ARTISTS).unwrap_or_default();

    let tracks = shelf_items(Some(shelf))
        .filter_map(|item| {
            let mut track = parse_track_row(item, CandidateKind::Song)?;
            if track.artist.is_empty() {
                track.artist = album_artist.to_string();
            }
            track.album = album_title.clone();
            Some(track)
        })
        .collect();

    Ok(tracks)
}

/// Playlist tiles of the library grid, `VL` prefix removed from the ids.
fn parse_grid_items(items: Option<&Value>) -> Vec<PlaylistSummary> {
    items
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get("musicTwoRowItemRenderer"))
        .filter_map(|item| {
            let title = item.pointer("/title/runs/0");
            // the "New playlist" tile has no browse endpoint
            let browse_id = title.and_then(run_browse_id)?;
            Some(PlaylistSummary {
                id: utils::playlist_id_from_browse_id(browse_id),
                title: title.and_then(run_text)?.to_string(),
            })
        })
        .collect()
}

fn next_continuation(container: Option<&Value>) -> Option<String> {
    container
        .and_then(|c| c.pointer("/continuations/0/nextContinuationData/continuation"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// First page of the library playlists and the token of the next page.
pub fn parse_library_playlists(response: &Value) -> (Vec<PlaylistSummary>, Option<String>) {
    let grid = response.pointer(LIBRARY_GRID);
    (
        parse_grid_items(grid.and_then(|g| g.get("items"))),
        next_continuation(grid),
    )
}

/// A continuation page of the library playlists.
pub fn parse_library_continuation(response: &Value) -> (Vec<PlaylistSummary>, Option<String>) {
    let grid = response.pointer("/continuationContents/gridContinuation");
    (
        parse_grid_items(grid.and_then(|g| g.get("items"))),
        next_continuation(grid),
    )
}

/// Title of a playlist page.
///
/// A page without any known header means the playlist does not exist or is
/// not visible to the account, reported as [`ServiceError::NotFound`].
pub fn parse_playlist(
    response: &Value,
    playlist_id: &str,
) -> Result<PlaylistSummary, ServiceError> {
    let title = first_str(response, &PLAYLIST_TITLES)
        .ok_or_else(|| ServiceError::NotFound(format!("playlist {}", playlist_id)))?;

    Ok(PlaylistSummary {
        id: playlist_id.to_string(),
        title: title.to_string(),
    })
}

/// Id of the playlist returned by `playlist/create`.
pub fn parse_created_playlist_id(response: &Value) -> Result<String, ServiceError> {
    response
        .get("playlistId")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::Parse("playlist/create returned no playlistId".into()))
}

/// `browse/edit_playlist` answers 200 even when the edit was rejected.
pub fn check_edit_status(response: &Value) -> Result<(), ServiceError> {
    match response.get("status").and_then(Value::as_str) {
        Some("STATUS_SUCCEEDED") => Ok(()),
        Some(status) => Err(ServiceError::Api(format!("edit_playlist status {}", status))),
        None => Err(ServiceError::Parse("edit_playlist returned no status".into())),
    }
}
