use super::*;
use crate::rules::{Rule, categorize};

fn t(uri: &str, artist_id: &str, artist: &str, ms: u64) -> Track {
    Track {
        uri: uri.into(),
        name: uri.into(),
        artist_id: artist_id.into(),
        artist_name: artist.into(),
        duration_ms: ms,
        ..Track::default()
    }
}

#[test]
fn summarize_counts_duration_artists_and_explicit() {
    let mut tracks = vec![
        t("a", "x", "X", 60_000),
        t("b", "x", "X", 120_000),
        t("c", "y", "Y", 180_000),
        t("d", "", "", 30_000),
    ];
    tracks[2].explicit = Some(true);
    tracks[0].album.release_date = Some("1999-01-01".into());
    tracks[1].release_date = Some("2004".into());
    tracks[2].release_year = Some(2004);

    let rules = categorize(vec![Rule::new("artist_limit", "2")]);
    let s = summarize(&tracks, &rules);

    assert_eq!(s.track_count, 4);
    assert_eq!(s.duration_ms, 390_000);
    assert!((s.duration_min - 6.5).abs() < 1e-9);
    assert_eq!(s.artist_count, 2);
    assert_eq!(s.explicit_count, 1);
    assert_eq!(
        s.top_artists[0],
        ArtistCount {
            name: "X".into(),
            count: 2
        }
    );
    assert_eq!(s.years.get(&2004), Some(&2));
    assert_eq!(s.oldest_year, Some(1999));
    assert_eq!(s.newest_year, Some(2004));
    assert!(s.rules_used.contains("artist_limit"));
}

#[test]
fn summarize_empty_playlist_is_zeroed() {
    let s = summarize(&[], &categorize(Vec::<Rule>::new()));
    assert_eq!(s.track_count, 0);
    assert_eq!(s.duration_ms, 0);
    assert!(s.top_artists.is_empty());
    assert_eq!(s.oldest_year, None);
    assert_eq!(s.rules_used, "{}");
}

#[test]
fn top_artists_keeps_five_ordered_by_count() {
    let mut tracks = Vec::new();
    for (i, artist) in ["a", "b", "c", "d", "e", "f"].iter().enumerate() {
        for n in 0..=i {
            tracks.push(t(&format!("{artist}{n}"), artist, artist, 1000));
        }
    }
    let s = summarize(&tracks, &categorize(Vec::<Rule>::new()));
    assert_eq!(s.top_artists.len(), 5);
    assert_eq!(s.top_artists[0].name, "f");
    assert_eq!(s.top_artists[0].count, 6);
    assert_eq!(s.top_artists[4].name, "b");
}
