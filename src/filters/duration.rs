use log::{debug, info};
use rand::Rng;

use crate::engine::{BuildContext, Warning};
use crate::library::Track;
use crate::rules::{RuleSet, RuleType};

const MS_PER_MINUTE: u64 = 60 * 1000;

/// Configured `(min, max)` playlist duration in milliseconds, zero when unset.
pub fn duration_bounds_ms(rules: &RuleSet) -> Result<(u64, u64), crate::error::CurateError> {
    let min = rules.parse_param::<u64>(&RuleType::MinDuration)?.unwrap_or(0);
    let max = rules.parse_param::<u64>(&RuleType::MaxDuration)?.unwrap_or(0);
    Ok((
        min.saturating_mul(MS_PER_MINUTE),
        max.saturating_mul(MS_PER_MINUTE),
    ))
}

pub fn total_duration_ms(tracks: &[Track]) -> u64 {
    tracks
        .iter()
        .fold(0u64, |total, t| total.saturating_add(t.duration_ms))
}

/// Select tracks, longest first, to land between the minimum and maximum
/// playlist duration.
///
/// Tracks are always admitted while below the minimum; past it, only while
/// the maximum is not exceeded. Falling short of the minimum is recorded as a
/// warning and the accumulated tracks are returned.
pub fn duration_filter<R: Rng>(
    tracks: Vec<Track>,
    rules: &RuleSet,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let (min_ms, max_ms) = match duration_bounds_ms(rules) {
        Ok((0, 0)) => return tracks,
        Ok(bounds) => bounds,
        Err(err) => {
            ctx.diagnostics.malformed(err);
            return tracks;
        }
    };
    info!(
        "Applying duration rules: min={}min, max={}min",
        min_ms / MS_PER_MINUTE,
        max_ms / MS_PER_MINUTE
    );

    let mut sorted = tracks;
    sorted.sort_by(|a, b| b.duration_ms.cmp(&a.duration_ms));

    let mut total = 0u64;
    let mut kept = Vec::new();
    for track in sorted {
        let new_total = total.saturating_add(track.duration_ms);
        if min_ms > 0 && total < min_ms {
            debug!(
                "Added track ({}, {:.2}min) to meet minimum duration",
                track.name,
                track.duration_ms as f64 / MS_PER_MINUTE as f64
            );
        } else if max_ms > 0 && new_total > max_ms {
            info!(
                "Reached maximum duration ({}min), stopping at {} tracks",
                max_ms / MS_PER_MINUTE,
                kept.len()
            );
            break;
        }
        total = new_total;
        kept.push(track);
    }

    info!(
        "Final playlist duration: {:.2} minutes ({} tracks)",
        total as f64 / MS_PER_MINUTE as f64,
        kept.len()
    );

    if min_ms > 0 && total < min_ms {
        ctx.diagnostics.warn(Warning::MinimumDurationUnreachable {
            target_ms: min_ms,
            reached_ms: total,
        });
    }
    kept
}
