use log::{info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::filters::{artist_limit_filter, duration_filter};
use crate::library::Track;
use crate::rules::CategorizedRules;

use super::chunked::process_in_chunks;
use super::context::{BuildContext, Warning};
use super::refill::{refill, refill_with_artist_limit, take_random_tracks};

/// Run content, artist and duration rules over a pool, refilling whenever a
/// stage leaves the selection empty or short.
///
/// The caller's pool is left untouched. The result is shuffled and never
/// empty unless `tracks` is.
pub fn process_tracks_with_rules<R: Rng>(
    tracks: &[Track],
    rules: &CategorizedRules,
    chunk_size: usize,
    max_tracks: usize,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let total = tracks.len();
    info!("Processing {total} tracks with rules");

    let mut filtered = if rules.has_content_filter {
        info!("Applying content filters first");
        process_in_chunks(tracks.to_vec(), &rules.content_rules, chunk_size, ctx)
    } else {
        tracks.to_vec()
    };

    if filtered.is_empty() && total > 0 {
        filtered = refill(tracks, filtered, max_tracks, ctx);
        ctx.diagnostics.warn(Warning::ContentRefill {
            refilled: filtered.len(),
        });
    }

    if rules.has_artist_limit {
        info!("Applying artist limits to {} tracks", filtered.len());
        filtered.shuffle(&mut ctx.rng);
        let before = filtered.len();
        filtered = artist_limit_filter(filtered, &rules.artist_rules, ctx);
        ctx.diagnostics.stage("artist_limit", before, filtered.len());

        if filtered.len() < max_tracks && total > max_tracks {
            info!("Artist limits created gaps, attempting refill");
            let before = filtered.len();
            filtered =
                refill_with_artist_limit(tracks, filtered, &rules.artist_rules, max_tracks, ctx);
            ctx.diagnostics
                .stage("artist_refill", before, filtered.len());
        }
    }

    if rules.has_duration_rule {
        info!("Applying duration rules to {} tracks", filtered.len());
        let before = filtered.len();
        filtered = duration_filter(filtered, &rules.duration_rules, ctx);
        ctx.diagnostics.stage("duration", before, filtered.len());
    }

    if filtered.is_empty() && total > 0 {
        warn!("All tracks were filtered out. Relaxing constraints.");
        filtered = if rules.has_artist_limit {
            refill_with_artist_limit(tracks, Vec::new(), &rules.artist_rules, max_tracks, ctx)
        } else {
            take_random_tracks(tracks, max_tracks, &mut ctx.rng)
        };
        ctx.diagnostics.warn(Warning::EmptyAfterFilters {
            fallback: filtered.len(),
        });
    }

    filtered.shuffle(&mut ctx.rng);
    info!(
        "After applying all rules: {} tracks remain",
        filtered.len()
    );
    filtered
}
