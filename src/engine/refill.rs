//! Backfilling an over-filtered selection from the original pool.
//!
//! The uri is the only de-duplication signal; tracks already selected are
//! never removed.

use std::collections::{HashMap, HashSet};

use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::filters::artist_limit;
use crate::library::Track;
use crate::rules::RuleSet;

use super::context::BuildContext;

/// A random subset of at most `count` tracks.
pub fn take_random_tracks<R: Rng + ?Sized>(tracks: &[Track], count: usize, rng: &mut R) -> Vec<Track> {
    let mut copy = tracks.to_vec();
    copy.shuffle(rng);
    copy.truncate(count);
    copy
}

fn not_yet_selected(original: &[Track], filtered: &[Track]) -> Vec<Track> {
    let selected: HashSet<&str> = filtered.iter().map(|t| t.uri.as_str()).collect();
    original
        .iter()
        .filter(|t| !selected.contains(t.uri.as_str()))
        .cloned()
        .collect()
}

/// Refill when filters were too aggressive.
///
/// An empty result from a non-empty pool is replaced by a random sample of
/// the pool; a short result is topped up with random unselected tracks.
pub fn refill<R: Rng>(
    original: &[Track],
    mut filtered: Vec<Track>,
    max_tracks: usize,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    if filtered.is_empty() && !original.is_empty() {
        warn!("Filters removed all tracks, selecting random tracks instead");
        return take_random_tracks(original, max_tracks, &mut ctx.rng);
    }
    if filtered.len() < max_tracks {
        let needed = max_tracks - filtered.len();
        info!("Adding {needed} random tracks to meet minimum requirements");
        let available = not_yet_selected(original, &filtered);
        filtered.extend(take_random_tracks(&available, needed, &mut ctx.rng));
    }
    filtered
}

/// Top up to `max_tracks` without letting any artist exceed the configured
/// limit. Without a usable limit this is a plain [`refill`].
pub fn refill_with_artist_limit<R: Rng>(
    original: &[Track],
    mut filtered: Vec<Track>,
    artist_rules: &RuleSet,
    max_tracks: usize,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    if filtered.len() >= max_tracks {
        filtered.truncate(max_tracks);
        return filtered;
    }
    let limit = match artist_limit(artist_rules) {
        Ok(Some(limit)) => limit,
        Ok(None) => return refill(original, filtered, max_tracks, ctx),
        Err(err) => {
            ctx.diagnostics.malformed(err);
            return refill(original, filtered, max_tracks, ctx);
        }
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for t in &filtered {
        *counts.entry(t.artist_id.clone()).or_default() += 1;
    }

    let mut available = not_yet_selected(original, &filtered);
    available.shuffle(&mut ctx.rng);

    let before = filtered.len();
    for track in available {
        if filtered.len() >= max_tracks {
            break;
        }
        let count = counts.entry(track.artist_id.clone()).or_default();
        if *count < limit {
            *count += 1;
            filtered.push(track);
        }
    }
    info!(
        "Refilled {} tracks within artist limit ({} -> {})",
        filtered.len() - before,
        before,
        filtered.len()
    );
    filtered
}
