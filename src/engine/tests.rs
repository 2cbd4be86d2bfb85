use std::collections::{HashMap, HashSet};

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::error::CurateError;
use crate::filters::total_duration_ms;
use crate::library::Track;
use crate::rules::{Rule, RuleSet, categorize};

const MIN: u64 = 60_000;

fn ctx(seed: u64) -> BuildContext<StdRng> {
    BuildContext::new(StdRng::seed_from_u64(seed))
}

fn t(uri: &str, artist_id: &str, ms: u64) -> Track {
    Track {
        uri: uri.into(),
        name: format!("Song {uri}"),
        artist_id: artist_id.into(),
        duration_ms: ms,
        ..Track::default()
    }
}

/// `n` tracks, each by its own artist.
fn pool(n: usize, ms: u64) -> Vec<Track> {
    (0..n)
        .map(|i| t(&format!("u{i}"), &format!("artist{i}"), ms))
        .collect()
}

fn max_per_artist(tracks: &[Track]) -> usize {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for t in tracks {
        *counts.entry(t.artist_id.as_str()).or_default() += 1;
    }
    counts.into_values().max().unwrap_or(0)
}

fn uri_set(tracks: &[Track]) -> HashSet<String> {
    tracks.iter().map(|t| t.uri.clone()).collect()
}

fn build(tracks: &[Track], rules: Vec<Rule>, max_tracks: usize, seed: u64) -> Playlist {
    let options = BuildOptions {
        max_tracks,
        ..BuildOptions::default()
    };
    curate(tracks, rules, options, &mut ctx(seed)).unwrap()
}

#[test]
fn take_random_tracks_is_bounded_and_seeded() {
    let tracks = pool(10, MIN);
    let a = take_random_tracks(&tracks, 4, &mut StdRng::seed_from_u64(3));
    let b = take_random_tracks(&tracks, 4, &mut StdRng::seed_from_u64(3));
    assert_eq!(a.len(), 4);
    assert_eq!(a, b);
    assert_eq!(take_random_tracks(&tracks, 50, &mut StdRng::seed_from_u64(3)).len(), 10);
    assert!(take_random_tracks(&[], 5, &mut StdRng::seed_from_u64(3)).is_empty());
}

#[test]
fn refill_replaces_empty_result_with_sample() {
    let original = pool(30, MIN);
    let out = refill(&original, Vec::new(), 10, &mut ctx(1));
    assert_eq!(out.len(), 10);
    assert!(uri_set(&out).is_subset(&uri_set(&original)));
}

#[test]
fn refill_tops_up_without_duplicates_and_keeps_selection() {
    let original = pool(12, MIN);
    let selected = vec![original[3].clone(), original[7].clone()];
    let out = refill(&original, selected.clone(), 8, &mut ctx(2));
    assert_eq!(out.len(), 8);
    assert_eq!(&out[..2], &selected[..]);
    assert_eq!(uri_set(&out).len(), 8);

    // Exhausting the pool stops short of the target.
    let out = refill(&original, selected, 50, &mut ctx(2));
    assert_eq!(out.len(), 12);
}

#[test]
fn refill_with_artist_limit_respects_cap() {
    let mut original = Vec::new();
    for i in 0..10 {
        original.push(t(&format!("a{i}"), "a", MIN));
    }
    for i in 0..3 {
        original.push(t(&format!("b{i}"), "b", MIN));
    }
    let selected = vec![original[0].clone()];
    let mut rules = RuleSet::new();
    rules.insert("artist_limit", "2");

    let out = refill_with_artist_limit(&original, selected, &rules, 10, &mut ctx(4));
    // a: 2, b: 2, nothing else is eligible.
    assert_eq!(out.len(), 4);
    assert_eq!(out[0].uri, "a0");
    assert!(max_per_artist(&out) <= 2);
}

#[test]
fn refill_with_artist_limit_truncates_full_selection() {
    let original = pool(20, MIN);
    let mut rules = RuleSet::new();
    rules.insert("artist_limit", "1");
    let out = refill_with_artist_limit(&original, original.clone(), &rules, 5, &mut ctx(4));
    assert_eq!(out.len(), 5);
    assert_eq!(out[0].uri, "u0");
}

#[test]
fn process_in_chunks_filters_every_chunk() {
    let mut tracks = pool(25, MIN);
    for (i, t) in tracks.iter_mut().enumerate() {
        t.popularity = if i % 5 == 0 { 90 } else { 10 };
    }
    let mut rules = RuleSet::new();
    rules.insert("min_popularity", "50");
    let mut c = ctx(5);

    let out = process_in_chunks(tracks, &rules, 10, &mut c);
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|t| t.popularity == 90));
    // Three chunks, four content stages each.
    assert_eq!(c.diagnostics.stages.len(), 12);
}

#[test]
fn process_in_chunks_keeps_chunk_order_and_tolerates_zero_size() {
    let tracks = pool(7, MIN);
    let mut c = ctx(6);
    let out = process_in_chunks(tracks.clone(), &RuleSet::new(), 3, &mut c);
    assert_eq!(uri_set(&out), uri_set(&tracks));
    // Chunks are contiguous: the first three survivors come from the first chunk.
    let first: HashSet<String> = out[..3].iter().map(|t| t.uri.clone()).collect();
    assert_eq!(first, uri_set(&tracks[..3]));

    let out = process_in_chunks(tracks, &RuleSet::new(), 0, &mut c);
    assert_eq!(out.len(), 7);
}

#[test]
fn scenario_artist_cap_with_refill() {
    let mut tracks = pool(147, 3 * MIN);
    for i in 0..3 {
        tracks.push(t(&format!("x{i}"), "X", 3 * MIN));
    }
    let playlist = build(&tracks, vec![Rule::new("artist_limit", "2")], 100, 11);

    assert_eq!(playlist.tracks.len(), 100);
    let by_x = playlist.tracks.iter().filter(|t| t.artist_id == "X").count();
    assert!(by_x <= 2);
    assert_eq!(uri_set(&playlist.tracks).len(), 100);
}

#[test]
fn scenario_clean_only_over_explicit_pool_refills() {
    let mut tracks = pool(10, 3 * MIN);
    for t in &mut tracks {
        t.explicit = Some(true);
    }
    let playlist = build(&tracks, vec![Rule::new("explicit_filter", "clean_only")], 100, 12);

    assert_eq!(playlist.tracks.len(), 10);
    assert_eq!(uri_set(&playlist.tracks), uri_set(&tracks));
    assert!(
        playlist
            .report
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::ContentRefill { refilled: 10 }))
    );
}

#[test]
fn scenario_unreachable_minimum_duration_keeps_everything() {
    let tracks = pool(10, 4 * MIN);
    let playlist = build(&tracks, vec![Rule::new("min_duration", "60")], 100, 13);

    assert_eq!(uri_set(&playlist.tracks), uri_set(&tracks));
    assert!(playlist.report.warnings.iter().any(|w| matches!(
        w,
        Warning::MinimumDurationUnreachable { .. }
    )));
}

#[test]
fn scenario_no_rules_shuffles_and_truncates() {
    let tracks = pool(150, MIN);
    let playlist = build(&tracks, Vec::new(), 100, 14);
    assert_eq!(playlist.tracks.len(), 100);
    assert!(uri_set(&playlist.tracks).is_subset(&uri_set(&tracks)));

    let small = pool(20, MIN);
    let playlist = build(&small, Vec::new(), 100, 14);
    assert_eq!(uri_set(&playlist.tracks), uri_set(&small));
    assert_ne!(
        playlist.tracks.iter().map(|t| &t.uri).collect::<Vec<_>>(),
        small.iter().map(|t| &t.uri).collect::<Vec<_>>()
    );
}

#[test]
fn empty_pool_is_a_typed_error() {
    let err = curate(&[], Vec::<Rule>::new(), BuildOptions::default(), &mut ctx(1)).unwrap_err();
    assert!(matches!(err, CurateError::NoCandidateTracks));
}

#[test]
fn aggressive_rules_never_empty_a_non_empty_pool() {
    let mut tracks = pool(40, 3 * MIN);
    for t in &mut tracks {
        t.popularity = 10;
        t.release_year = Some(1970);
    }
    let rules = vec![
        Rule::new("min_popularity", "99"),
        Rule::new("min_year", "2020"),
        Rule::new("saved_within", "7"),
        Rule::new("max_duration", "1"),
        Rule::new("artist_limit", "1"),
    ];
    for seed in 0..5 {
        let playlist = build(&tracks, rules.clone(), 25, seed);
        assert!(!playlist.tracks.is_empty());
        assert!(playlist.tracks.len() <= 25);
        assert!(max_per_artist(&playlist.tracks) <= 1);
    }
}

#[test]
fn minimum_duration_is_met_when_pool_allows() {
    // 150 tracks of 2 minutes; 100 of them give 200 minutes, ask for 250.
    let tracks = pool(150, 2 * MIN);
    let playlist = build(&tracks, vec![Rule::new("min_duration", "250")], 100, 21);

    assert!(total_duration_ms(&playlist.tracks) >= 250 * MIN);
    // The duration floor wins over the size cap.
    assert_eq!(playlist.tracks.len(), 125);
}

#[test]
fn output_never_exceeds_cap_without_duration_override() {
    let mut tracks = Vec::new();
    for i in 0..300 {
        tracks.push(t(&format!("u{i}"), &format!("artist{}", i % 40), 3 * MIN));
    }
    for seed in 0..5 {
        let playlist = build(
            &tracks,
            vec![
                Rule::new("artist_limit", "3"),
                Rule::new("max_duration", "600"),
            ],
            100,
            seed,
        );
        assert!(playlist.tracks.len() <= 100);
        assert!(max_per_artist(&playlist.tracks) <= 3);
    }
}

#[test]
fn validate_reapplies_artist_limit_on_oversized_input() {
    let mut tracks = Vec::new();
    for i in 0..6 {
        tracks.push(t(&format!("a{i}"), "a", MIN));
    }
    tracks.extend(pool(6, MIN));
    let rules = categorize(vec![Rule::new("artist_limit", "2")]);

    let out = validate_final_playlist(tracks, &rules, 5, &mut ctx(1));
    assert_eq!(out.len(), 5);
    assert!(max_per_artist(&out) <= 2);
}

#[test]
fn validate_duration_top_up_respects_artist_cap() {
    // Head: five 1-minute tracks by "a" (cap 5). Overflow: long tracks by "a"
    // and shorter ones by others.
    let mut tracks: Vec<Track> = (0..5).map(|i| t(&format!("h{i}"), "a", MIN)).collect();
    tracks.push(t("long_a", "a", 10 * MIN));
    tracks.push(t("mid_b", "b", 4 * MIN));
    tracks.push(t("mid_c", "c", 3 * MIN));
    tracks.push(t("short_d", "d", 2 * MIN));
    let rules = categorize(vec![
        Rule::new("artist_limit", "5"),
        Rule::new("min_duration", "11"),
    ]);

    let out = validate_final_playlist(tracks, &rules, 5, &mut ctx(1));
    let added: Vec<&str> = out[5..].iter().map(|t| t.uri.as_str()).collect();
    // long_a is the sixth track by "a" and goes; 5 + 4 + 3 = 12 >= 11.
    assert_eq!(added, vec!["mid_b", "mid_c"]);
}

#[test]
fn validate_truncates_when_duration_already_met() {
    let tracks = pool(20, 5 * MIN);
    let rules = categorize(vec![Rule::new("min_duration", "30")]);
    let out = validate_final_playlist(tracks.clone(), &rules, 10, &mut ctx(1));
    assert_eq!(out, tracks[..10].to_vec());
}

#[test]
fn seeded_builds_are_reproducible() {
    let tracks = pool(200, 3 * MIN);
    let rules = vec![Rule::new("artist_limit", "1"), Rule::new("max_duration", "90")];
    let a = build(&tracks, rules.clone(), 50, 99);
    let b = build(&tracks, rules, 50, 99);
    assert_eq!(a.tracks, b.tracks);
}

#[test]
fn unknown_rules_do_not_filter() {
    let tracks = pool(30, MIN);
    let playlist = build(&tracks, vec![Rule::new("tempo", "fast")], 100, 5);
    assert_eq!(uri_set(&playlist.tracks), uri_set(&tracks));
    assert_eq!(playlist.rules.all_rules.len(), 1);
    assert!(!playlist.rules.has_content_filter);
}

#[test]
fn huge_durations_saturate_instead_of_overflowing() {
    let huge = u64::MAX / 2 + 1;
    let tracks = vec![t("a", "a", huge), t("b", "b", huge)];
    let playlist = build(&tracks, vec![Rule::new("min_duration", "1")], 100, 8);

    assert_eq!(uri_set(&playlist.tracks), uri_set(&tracks));
    assert_eq!(playlist.summary.duration_ms, u64::MAX);
}

#[test]
fn validate_top_up_saturates_running_total() {
    let huge = u64::MAX / 2 + 1;
    let tracks = vec![t("h", "h", MIN), t("a", "a", huge), t("b", "b", huge)];
    let rules = categorize(vec![Rule::new("min_duration", "9999999")]);

    let out = validate_final_playlist(tracks, &rules, 1, &mut ctx(1));
    assert_eq!(out.len(), 2);
    assert_eq!(out[1].duration_ms, huge);
}
