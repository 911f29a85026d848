mod common;

use common::{FakeMusicService, album, song, video};
use spotify2ytmusic::matcher::{MatchError, Matcher, SearchDetails, is_fuzzy_match, is_strict_match};
use spotify2ytmusic::types::{CandidateKind, SearchAlgorithm, TrackDescriptor};

fn bohemian() -> TrackDescriptor {
    TrackDescriptor::new("Bohemian Rhapsody", "Queen", "A Night at the Opera")
}

#[tokio::test]
async fn test_exact_takes_first_song() {
    let service = FakeMusicService::new().with_songs(
        "Bohemian Rhapsody by Queen",
        vec![
            song("v1", "Bohemian Rhapsody", "Queen", "A Night at the Opera"),
            song("v2", "Bohemian Rhapsody (Live)", "Queen", "Live Killers"),
        ],
    );

    let found = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Exact)
        .await
        .unwrap();

    assert_eq!(found.id, "v1");
    assert_eq!(
        service.calls(),
        vec![
            "search_albums:A Night at the Opera by Queen",
            "search_songs:Bohemian Rhapsody by Queen",
        ]
    );
}

#[tokio::test]
async fn test_exact_without_results_is_not_found() {
    let service = FakeMusicService::new();

    let err = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Exact)
        .await
        .unwrap_err();

    assert!(matches!(err, MatchError::NotFound(t) if t == bohemian()));
}

#[tokio::test]
async fn test_album_lookup_wins_over_song_search() {
    let service = FakeMusicService::new()
        .with_albums(
            "A Night at the Opera by Queen",
            vec![
                album("MPRE_missing", "A Night at the Opera (Deluxe)", "Queen"),
                album("MPRE_opera", "A Night at the Opera", "Queen"),
            ],
        )
        .with_album_tracks(
            "MPRE_opera",
            vec![
                song("a1", "Death on Two Legs", "Queen", "A Night at the Opera"),
                song("a11", "Bohemian Rhapsody", "Queen", "A Night at the Opera"),
            ],
        )
        .with_songs(
            "Bohemian Rhapsody by Queen",
            vec![song("v1", "Bohemian Rhapsody", "Queen", "Greatest Hits")],
        );

    let found = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Strict)
        .await
        .unwrap();

    // The first album fails to load; the lookup goes on with the next one
    assert_eq!(found.id, "a11");
    assert!(service.calls_starting_with("search_songs").is_empty());
}

#[tokio::test]
async fn test_album_lookup_inspects_three_albums() {
    let albums = (1..=5)
        .map(|n| album(&format!("MPRE{}", n), "Other", "Queen"))
        .collect();
    let service = FakeMusicService::new()
        .with_albums("A Night at the Opera by Queen", albums)
        .with_album_tracks(
            "MPRE4",
            vec![song("late", "Bohemian Rhapsody", "Queen", "Other")],
        );

    let result = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Exact)
        .await;

    assert!(matches!(result, Err(MatchError::NotFound(_))));
    assert_eq!(service.calls_starting_with("get_album").len(), 3);
}

#[tokio::test]
async fn test_strict_requires_all_fields() {
    let service = FakeMusicService::new().with_songs(
        "Bohemian Rhapsody by Queen",
        vec![
            song("v1", "Bohemian Rhapsody", "Queen", "Greatest Hits"),
            song("v2", "Bohemian Rhapsody", "Queen", "A Night at the Opera"),
        ],
    );

    let found = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Strict)
        .await
        .unwrap();
    assert_eq!(found.id, "v2");

    let service = FakeMusicService::new().with_songs(
        "Bohemian Rhapsody by Queen",
        vec![song("v1", "Bohemian Rhapsody", "Queen", "Greatest Hits")],
    );
    let result = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Strict)
        .await;
    assert!(matches!(result, Err(MatchError::NotFound(_))));
}

#[test]
fn test_is_strict_match_iff_all_fields_equal() {
    let track = bohemian();
    let opera = "A Night at the Opera";
    let cases = [
        (song("1", "Bohemian Rhapsody", "Queen", opera), true),
        (song("2", "bohemian rhapsody", "Queen", opera), false),
        (song("3", "Bohemian Rhapsody", "Queen & Co", opera), false),
        (song("4", "Bohemian Rhapsody", "Queen", "Jazz"), false),
        (video("5", "Bohemian Rhapsody", "Queen"), false),
    ];

    for (candidate, expected) in cases {
        let matched = is_strict_match(&candidate, &track);
        assert_eq!(matched, expected, "{}", candidate);
    }
}

#[test]
fn test_is_fuzzy_match() {
    let track = bohemian();

    // Brackets are ignored
    assert!(is_fuzzy_match(
        &song("1", "Bohemian Rhapsody (Remastered 2011)", "Queen", "x"),
        &track
    ));
    // Substring in both directions
    assert!(is_fuzzy_match(&song("2", "Rhapsody", "Queen", "x"), &track));
    assert!(is_fuzzy_match(
        &song("3", "Bohemian Rhapsody - Live Aid", "Queen", "x"),
        &track
    ));
    // Artist containing the searched artist
    assert!(is_fuzzy_match(
        &song("4", "Bohemian Rhapsody", "Queen & Freddie Mercury", "x"),
        &track
    ));

    assert!(!is_fuzzy_match(
        &song("5", "Bohemian Rhapsody", "Panic! at the Disco", "x"),
        &track
    ));
    assert!(!is_fuzzy_match(&song("6", "Killer Queen", "Queen", "x"), &track));
    // A title made only of brackets matches nothing
    assert!(!is_fuzzy_match(&song("7", "(Intro)", "Queen", "x"), &track));
}

#[tokio::test]
async fn test_fuzzy_prefers_matching_song_over_ranking() {
    let service = FakeMusicService::new().with_songs(
        "Bohemian Rhapsody by Queen",
        vec![
            song("cover", "Bohemian Rhapsody", "The Muppets", "Muppets"),
            song("v2", "Bohemian Rhapsody [Live]", "Queen", "Live at Wembley"),
        ],
    );

    let found = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Fuzzy)
        .await
        .unwrap();

    assert_eq!(found.id, "v2");
    assert!(service.calls_starting_with("search_videos").is_empty());
}

#[tokio::test]
async fn test_fuzzy_keeps_acceptable_first_song() {
    let track = TrackDescriptor::new("Intro", "The xx", "xx");
    // "(Intro)" strips to nothing, but the raw title still contains "Intro"
    let service = FakeMusicService::new().with_songs(
        "Intro by The xx",
        vec![song("v1", "(Intro)", "The xx", "xx")],
    );

    let found = Matcher::new(&service)
        .resolve(&track, SearchAlgorithm::Fuzzy)
        .await
        .unwrap();

    assert_eq!(found.id, "v1");
    assert!(service.calls_starting_with("search_videos").is_empty());
}

#[tokio::test]
async fn test_fuzzy_falls_back_to_videos() {
    let service = FakeMusicService::new()
        .with_songs(
            "Bohemian Rhapsody by Queen",
            vec![song("cover", "Bohemian Rhapsody", "The Muppets", "Muppets")],
        )
        .with_videos(
            "Bohemian Rhapsody by Queen",
            vec![
                video("other", "Don't Stop Me Now", "Queen"),
                video("official", "BOHEMIAN RHAPSODY (Official Video)", "Queen"),
            ],
        );

    let found = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Fuzzy)
        .await
        .unwrap();

    assert_eq!(found.id, "official");
    assert_eq!(found.kind, CandidateKind::Video);
}

#[tokio::test]
async fn test_fuzzy_without_songs_searches_videos() {
    let service = FakeMusicService::new().with_videos(
        "Bohemian Rhapsody by Queen",
        vec![video("official", "Bohemian Rhapsody", "Queen")],
    );

    let found = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Fuzzy)
        .await
        .unwrap();

    assert_eq!(found.id, "official");
}

#[tokio::test]
async fn test_fuzzy_not_found() {
    let service = FakeMusicService::new()
        .with_songs(
            "Bohemian Rhapsody by Queen",
            vec![song("cover", "Rhapsody in Blue", "Gershwin", "x")],
        )
        .with_videos(
            "Bohemian Rhapsody by Queen",
            vec![video("other", "Radio Ga Ga", "Queen")],
        );

    let result = Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Fuzzy)
        .await;

    assert!(matches!(result, Err(MatchError::NotFound(_))));
}

#[tokio::test]
async fn test_details_of_the_song_search() {
    let query = "Bohemian Rhapsody by Queen";
    let songs = vec![
        song("v1", "Bohemian Rhapsody", "Queen", "Greatest Hits"),
        song("v2", "Bohemian Rhapsody", "Queen", "A Night at the Opera"),
    ];
    let service = FakeMusicService::new()
        .with_songs(query, songs.clone())
        .with_suggestions(query, &["bohemian rhapsody by queen lyrics"]);

    let mut details = SearchDetails::default();
    let found = Matcher::new(&service)
        .resolve_with_details(&bohemian(), SearchAlgorithm::Strict, &mut details)
        .await
        .unwrap();

    assert_eq!(found.id, "v2");
    assert_eq!(details.query.as_deref(), Some(query));
    assert_eq!(details.songs, songs);
    assert_eq!(
        details.suggestions,
        vec!["bohemian rhapsody by queen lyrics"]
    );
}

#[tokio::test]
async fn test_details_stay_empty_on_album_hit() {
    let service = FakeMusicService::new()
        .with_albums(
            "A Night at the Opera by Queen",
            vec![album("MPRE_opera", "A Night at the Opera", "Queen")],
        )
        .with_album_tracks(
            "MPRE_opera",
            vec![song("a11", "Bohemian Rhapsody", "Queen", "A Night at the Opera")],
        );

    let mut details = SearchDetails::default();
    let found = Matcher::new(&service)
        .resolve_with_details(&bohemian(), SearchAlgorithm::Exact, &mut details)
        .await
        .unwrap();

    assert_eq!(found.id, "a11");
    assert_eq!(details, SearchDetails::default());
    assert!(service.calls_starting_with("search_suggestions").is_empty());
}

#[tokio::test]
async fn test_resolve_skips_suggestions() {
    let service = FakeMusicService::new().with_songs(
        "Bohemian Rhapsody by Queen",
        vec![song("v1", "Bohemian Rhapsody", "Queen", "A Night at the Opera")],
    );

    Matcher::new(&service)
        .resolve(&bohemian(), SearchAlgorithm::Exact)
        .await
        .unwrap();

    assert!(service.calls_starting_with("search_suggestions").is_empty());
}
