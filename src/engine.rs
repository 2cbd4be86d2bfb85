//! The curation engine: chunked content filtering, refill, the end-to-end
//! pipeline and final validation.
//!
//! Every stage takes a [`BuildContext`], which owns the random source and
//! the diagnostics of one build. Nothing is shared between builds.

mod chunked;
mod context;
mod curate;
mod pipeline;
mod refill;
mod validate;

pub use chunked::process_in_chunks;
pub use context::{
    BuildContext, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TRACKS, Diagnostics, ExplicitFallback,
    ExplicitPolicy, StageReport, Warning,
};
pub use curate::{BuildOptions, BuildReport, Playlist, curate};
pub use pipeline::process_tracks_with_rules;
pub use refill::{refill, refill_with_artist_limit, take_random_tracks};
pub use validate::validate_final_playlist;

#[cfg(test)]
mod tests;
