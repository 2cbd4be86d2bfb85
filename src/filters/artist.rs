use std::collections::HashMap;

use log::{debug, info};
use rand::Rng;

use crate::engine::BuildContext;
use crate::error::CurateError;
use crate::library::Track;
use crate::rules::{RuleSet, RuleType};

/// Configured per-artist cap. Absent, blank and zero all mean "no cap".
pub fn artist_limit(rules: &RuleSet) -> Result<Option<usize>, CurateError> {
    Ok(rules
        .parse_param::<usize>(&RuleType::ArtistLimit)?
        .filter(|&limit| limit > 0))
}

/// Count tracks per artist id.
pub fn artist_counts(tracks: &[Track]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for t in tracks {
        *counts.entry(t.artist_id.as_str()).or_default() += 1;
    }
    counts
}

/// Keep at most `artist_limit` tracks per artist, first come first kept.
///
/// Order-dependent: shuffle before calling if every track of an artist
/// should have the same chance of surviving.
pub fn artist_limit_filter<R: Rng>(
    tracks: Vec<Track>,
    rules: &RuleSet,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let limit = match artist_limit(rules) {
        Ok(Some(limit)) => limit,
        Ok(None) => return tracks,
        Err(err) => {
            ctx.diagnostics.malformed(err);
            return tracks;
        }
    };
    info!("Applying artist limit: maximum {limit} tracks per artist");

    if log::log_enabled!(log::Level::Debug) {
        let mut top: Vec<(&str, usize)> = artist_counts(&tracks).into_iter().collect();
        top.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        debug!("Initial artist distribution (before limiting):");
        for (artist_id, count) in top.into_iter().take(10) {
            let name = tracks
                .iter()
                .find(|t| t.artist_id == artist_id)
                .map(|t| t.artist_name.as_str())
                .unwrap_or("Unknown");
            debug!("  - {name}: {count} tracks");
        }
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut kept = Vec::with_capacity(tracks.len());
    let mut excluded = 0usize;
    for track in tracks {
        let count = counts.entry(track.artist_id.clone()).or_default();
        if *count < limit {
            *count += 1;
            kept.push(track);
        } else {
            excluded += 1;
            if excluded <= 20 {
                debug!("  {excluded}. {} - {}", track.artist_name, track.name);
            }
        }
    }

    if excluded > 0 {
        info!("Excluded {excluded} tracks due to artist limit");
    }
    kept
}
