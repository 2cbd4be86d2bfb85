//! Playlist statistics for logging and history records.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};
use serde::Serialize;

use crate::filters::{is_explicit, total_duration_ms};
use crate::library::{Track, format_duration_ms};
use crate::rules::CategorizedRules;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaylistSummary {
    pub track_count: usize,
    pub duration_ms: u64,
    pub duration_min: f64,
    pub artist_count: usize,
    pub explicit_count: usize,
    pub top_artists: Vec<ArtistCount>,
    pub years: BTreeMap<i32, usize>,
    pub oldest_year: Option<i32>,
    pub newest_year: Option<i32>,
    /// The full rule mapping as JSON.
    pub rules_used: String,
}

pub fn summarize(tracks: &[Track], rules: &CategorizedRules) -> PlaylistSummary {
    let duration_ms = total_duration_ms(tracks);

    // artist id -> (first seen name, count, first position)
    let mut artists: HashMap<&str, (&str, usize, usize)> = HashMap::new();
    for (pos, t) in tracks.iter().enumerate() {
        if t.artist_id.is_empty() {
            continue;
        }
        artists
            .entry(t.artist_id.as_str())
            .or_insert((t.artist_name.as_str(), 0, pos))
            .1 += 1;
    }

    let mut top: Vec<(&str, usize, usize)> = artists.values().copied().collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    let top_artists = top
        .into_iter()
        .take(5)
        .map(|(name, count, _)| ArtistCount {
            name: if name.is_empty() { "Unknown" } else { name }.to_string(),
            count,
        })
        .collect();

    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for year in tracks.iter().filter_map(Track::year) {
        *years.entry(year).or_default() += 1;
    }

    PlaylistSummary {
        track_count: tracks.len(),
        duration_ms,
        duration_min: duration_ms as f64 / 60_000.0,
        artist_count: artists.len(),
        explicit_count: tracks.iter().filter(|t| is_explicit(t)).count(),
        top_artists,
        oldest_year: years.keys().next().copied(),
        newest_year: years.keys().next_back().copied(),
        years,
        rules_used: rules.rules_json(),
    }
}

/// Log a finished playlist: the summary at `info`, every track at `debug`.
pub fn log_summary(name: &str, tracks: &[Track], summary: &PlaylistSummary) {
    if tracks.is_empty() {
        warn!("Created empty playlist '{name}'");
        return;
    }

    info!("Created playlist '{name}' with {} tracks", summary.track_count);
    info!("  - Total duration: {:.2} minutes", summary.duration_min);
    info!("  - Unique artists: {}", summary.artist_count);
    if !summary.top_artists.is_empty() {
        info!("  - Top artists:");
        for a in &summary.top_artists {
            info!("    * {}: {} tracks", a.name, a.count);
        }
    }
    if !summary.years.is_empty() {
        let years = summary
            .years
            .iter()
            .map(|(year, count)| format!("{year}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        info!("  - Years distribution: {years}");
    }
    if summary.explicit_count > 0 {
        info!(
            "  - Explicit tracks: {} ({:.1}%)",
            summary.explicit_count,
            summary.explicit_count as f64 / summary.track_count as f64 * 100.0
        );
    }
    info!("  - Rules: {}", summary.rules_used);

    debug!("Playlist tracks:");
    for (i, t) in tracks.iter().enumerate() {
        debug!(
            "  {}. {} - {} ({})",
            i + 1,
            t.name,
            t.artist_name,
            format_duration_ms(t.duration_ms)
        );
    }
}

#[cfg(test)]
mod tests;
