use log::info;
use rand::Rng;

use crate::filters::apply_content_rules;
use crate::library::Track;
use crate::rules::RuleSet;

use super::context::BuildContext;

/// Apply content filters to `tracks` in contiguous batches of `chunk_size`.
///
/// Each batch is shuffled and filtered independently and the survivors are
/// concatenated in batch order. Pools that fit in one batch are filtered in
/// a single pass.
pub fn process_in_chunks<R: Rng>(
    tracks: Vec<Track>,
    content_rules: &RuleSet,
    chunk_size: usize,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let chunk_size = chunk_size.max(1);
    let total = tracks.len();
    if total <= chunk_size {
        return apply_content_rules(tracks, content_rules, ctx);
    }

    let chunks = total.div_ceil(chunk_size);
    let mut filtered = Vec::new();
    let mut rest = tracks;
    for index in 0..chunks {
        let tail = rest.split_off(chunk_size.min(rest.len()));
        let chunk = std::mem::replace(&mut rest, tail);
        info!(
            "Processing chunk {}/{} ({} tracks)",
            index + 1,
            chunks,
            chunk.len()
        );
        filtered.extend(apply_content_rules(chunk, content_rules, ctx));
    }
    filtered
}
