use std::collections::HashMap;

use log::info;
use rand::Rng;

use crate::filters::{artist_counts, artist_limit, artist_limit_filter, duration_bounds_ms, total_duration_ms};
use crate::library::Track;
use crate::rules::CategorizedRules;

use super::context::BuildContext;

/// Final pass over the pipeline output.
///
/// Re-asserts the artist cap, tops up towards the minimum duration from the
/// tracks beyond `max_tracks` and otherwise truncates to `max_tracks`. When
/// the top-up runs, the result may exceed `max_tracks`.
pub fn validate_final_playlist<R: Rng>(
    tracks: Vec<Track>,
    rules: &CategorizedRules,
    max_tracks: usize,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let mut result = tracks;

    let limit = if rules.has_artist_limit {
        match artist_limit(&rules.artist_rules) {
            Ok(limit) => limit,
            Err(err) => {
                ctx.diagnostics.malformed(err);
                None
            }
        }
    } else {
        None
    };

    if let Some(limit) = limit {
        if result.len() > max_tracks {
            let max_count = artist_counts(&result).into_values().max().unwrap_or(0);
            if max_count > limit {
                info!("Reapplying artist limit ({limit}) to final track list");
                let before = result.len();
                result = artist_limit_filter(result, &rules.artist_rules, ctx);
                ctx.diagnostics
                    .stage("final_artist_limit", before, result.len());
            }
        }
    }

    let min_ms = if rules.has_duration_rule {
        match duration_bounds_ms(&rules.duration_rules) {
            Ok((min_ms, _)) => min_ms,
            Err(err) => {
                ctx.diagnostics.malformed(err);
                0
            }
        }
    } else {
        0
    };

    if min_ms > 0 {
        let head_len = result.len().min(max_tracks);
        let current = total_duration_ms(&result[..head_len]);
        if current < min_ms {
            info!(
                "Final selection duration ({:.2} min) is below minimum ({:.2} min)",
                current as f64 / 60_000.0,
                min_ms as f64 / 60_000.0
            );
            let mut overflow = result.split_off(head_len);
            overflow.sort_by(|a, b| b.duration_ms.cmp(&a.duration_ms));

            let mut counts: HashMap<String, usize> = HashMap::new();
            if limit.is_some() {
                for t in &result {
                    *counts.entry(t.artist_id.clone()).or_default() += 1;
                }
            }

            let before = result.len();
            let mut running = current;
            for track in overflow {
                if let Some(limit) = limit {
                    let count = counts.entry(track.artist_id.clone()).or_default();
                    if *count >= limit {
                        continue;
                    }
                    *count += 1;
                }
                running = running.saturating_add(track.duration_ms);
                result.push(track);
                if running >= min_ms {
                    break;
                }
            }
            info!(
                "Adjusted selection to reach minimum duration: {:.2} min with {} tracks",
                running as f64 / 60_000.0,
                result.len()
            );
            ctx.diagnostics
                .stage("final_duration_top_up", before, result.len());
            return result;
        }
    }

    if result.len() > max_tracks {
        info!(
            "Limiting playlist to {max_tracks} tracks (from {})",
            result.len()
        );
        result.truncate(max_tracks);
    }
    result
}
