use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::error::CurateError;
use crate::library::Track;
use crate::rules::{CategorizedRules, RuleSet, categorize};
use crate::summary::{PlaylistSummary, summarize};

use super::context::{BuildContext, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TRACKS, StageReport, Warning};
use super::pipeline::process_tracks_with_rules;
use super::validate::validate_final_playlist;

/// Size parameters of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    pub max_tracks: usize,
    pub chunk_size: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_tracks: DEFAULT_MAX_TRACKS,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// What happened during a build, for debugging output.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub source_count: usize,
    pub final_count: usize,
    pub elapsed: Duration,
    pub stages: Vec<StageReport>,
    pub warnings: Vec<Warning>,
}

#[derive(Debug, Clone)]
pub struct Playlist {
    pub tracks: Vec<Track>,
    pub rules: CategorizedRules,
    pub summary: PlaylistSummary,
    pub report: BuildReport,
}

/// Build a playlist from `pool`: categorize the rules, run the pipeline and
/// the final validation.
///
/// An empty pool is reported as [`CurateError::NoCandidateTracks`]; every
/// other degradation is recorded in the returned report.
pub fn curate<R: Rng>(
    pool: &[Track],
    rules: impl Into<RuleSet>,
    options: BuildOptions,
    ctx: &mut BuildContext<R>,
) -> Result<Playlist, CurateError> {
    let started = Instant::now();
    if pool.is_empty() {
        return Err(CurateError::NoCandidateTracks);
    }

    let rules = categorize(rules);
    info!(
        "Rule categorization: content={:?} artist={:?} duration={:?}",
        rules.content_rules, rules.artist_rules, rules.duration_rules
    );
    ctx.explicit.sample_limit = options.max_tracks;

    let filtered =
        process_tracks_with_rules(pool, &rules, options.chunk_size, options.max_tracks, ctx);
    let tracks = validate_final_playlist(filtered, &rules, options.max_tracks, ctx);

    let summary = summarize(&tracks, &rules);
    let report = BuildReport {
        source_count: pool.len(),
        final_count: tracks.len(),
        elapsed: started.elapsed(),
        stages: ctx.diagnostics.stages.clone(),
        warnings: ctx.diagnostics.warnings.clone(),
    };

    Ok(Playlist {
        tracks,
        rules,
        summary,
        report,
    })
}
