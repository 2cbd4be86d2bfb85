//! Per-build state threaded through every stage: the random source, the
//! clock, explicit-filter policy and the diagnostics sink.

use std::fmt;

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use rand::Rng;

use crate::error::CurateError;
use crate::rules::RuleType;

/// Default cap on the number of tracks in a playlist.
pub const DEFAULT_MAX_TRACKS: usize = 100;
/// Default batch size for content filtering of large pools.
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Policy knobs for the `explicit_only` degradation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplicitPolicy {
    /// Fall back to title heuristics and then a random sample when an
    /// `explicit_only` filter matches nothing.
    pub fallbacks: bool,
    /// Upper bound on the random sample taken by the last fallback.
    pub sample_limit: usize,
}

impl Default for ExplicitPolicy {
    fn default() -> Self {
        Self {
            fallbacks: true,
            sample_limit: DEFAULT_MAX_TRACKS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplicitFallback {
    ProfanityHeuristic,
    RandomSample,
}

/// Something the build degraded around. Recorded, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    MalformedParameter { rule: RuleType, value: String },
    ContentRefill { refilled: usize },
    ExplicitFallback { fallback: ExplicitFallback, kept: usize },
    MinimumDurationUnreachable { target_ms: u64, reached_ms: u64 },
    EmptyAfterFilters { fallback: usize },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::MalformedParameter { rule, value } => {
                write!(f, "ignored {rule}: {value:?} is not a valid value")
            }
            Warning::ContentRefill { refilled } => write!(
                f,
                "content filters removed all tracks, refilled with {refilled} random tracks"
            ),
            Warning::ExplicitFallback { fallback, kept } => {
                let how = match fallback {
                    ExplicitFallback::ProfanityHeuristic => "title heuristic",
                    ExplicitFallback::RandomSample => "random sample",
                };
                write!(f, "no tracks flagged explicit, kept {kept} via {how}")
            }
            Warning::MinimumDurationUnreachable {
                target_ms,
                reached_ms,
            } => write!(
                f,
                "could not reach minimum duration of {:.1} min (only {:.1} min available)",
                *target_ms as f64 / 60_000.0,
                *reached_ms as f64 / 60_000.0
            ),
            Warning::EmptyAfterFilters { fallback } => write!(
                f,
                "all tracks were filtered out, fell back to {fallback} tracks"
            ),
        }
    }
}

/// Track count before and after one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: &'static str,
    pub before: usize,
    pub after: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    pub stages: Vec<StageReport>,
    pub warnings: Vec<Warning>,
    /// Set once the explicit lookup of a sample track has been logged.
    pub explicit_sample_logged: bool,
}

impl Diagnostics {
    pub fn stage(&mut self, stage: &'static str, before: usize, after: usize) {
        if before != after {
            info!("{stage} changed track count: {before} -> {after}");
        }
        self.stages.push(StageReport {
            stage,
            before,
            after,
        });
    }

    pub fn warn(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Record a parameter coercion failure. Other errors are only logged.
    pub fn malformed(&mut self, err: CurateError) {
        error!("Error applying rule: {err}");
        if let CurateError::MalformedParameter { rule, value } = err {
            self.warnings
                .push(Warning::MalformedParameter { rule, value });
        }
    }

    pub fn has_warning(&self, pred: impl Fn(&Warning) -> bool) -> bool {
        self.warnings.iter().any(pred)
    }
}

/// Everything a single playlist build needs besides tracks and rules.
pub struct BuildContext<R> {
    pub rng: R,
    pub now: DateTime<Utc>,
    pub explicit: ExplicitPolicy,
    pub diagnostics: Diagnostics,
}

impl<R: Rng> BuildContext<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            now: Utc::now(),
            explicit: ExplicitPolicy::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Pin the clock used by recency rules.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_explicit_policy(mut self, policy: ExplicitPolicy) -> Self {
        self.explicit = policy;
        self
    }
}
