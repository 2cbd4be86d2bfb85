use log::{debug, info};
use rand::Rng;

use crate::engine::{BuildContext, ExplicitFallback, Warning, take_random_tracks};
use crate::library::Track;
use crate::rules::{RuleSet, RuleType};

/// Words whose presence in a title marks a track as likely explicit when the
/// pool carries no explicit metadata at all.
pub const PROFANITY_WORDS: &[&str] = &[
    "fuck", "fucking", "fucked", "motherfucker", "shit", "bitch", "bitches", "damn", "ass",
    "asshole", "dick", "pussy", "bastard", "hoe", "hoes", "nigga", "cunt", "crap", "piss",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplicitMode {
    ExplicitOnly,
    CleanOnly,
    Any,
}

impl ExplicitMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "explicit_only" => Some(Self::ExplicitOnly),
            "clean_only" => Some(Self::CleanOnly),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Whether a track is explicit.
///
/// Lookup order: the track flag, the album flag, the raw payload, then a
/// title marker. Tracks without any signal count as clean.
pub fn is_explicit(track: &Track) -> bool {
    track
        .explicit
        .or(track.album.explicit)
        .or_else(|| track.raw.as_deref().and_then(explicit_from_raw))
        .unwrap_or_else(|| title_marks_explicit(&track.name))
}

fn explicit_from_raw(raw: &str) -> Option<bool> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    value
        .get("explicit")
        .and_then(serde_json::Value::as_bool)
        .or_else(|| value.pointer("/track/explicit").and_then(serde_json::Value::as_bool))
        .or_else(|| value.pointer("/album/explicit").and_then(serde_json::Value::as_bool))
}

fn title_marks_explicit(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains(" (explicit)") || lower.contains("[explicit]")
}

/// Whether any whole word of the title is on the profanity list.
pub fn title_has_profanity(name: &str) -> bool {
    name.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| PROFANITY_WORDS.contains(&word))
}

/// Keep only explicit or only clean tracks per `explicit_filter`.
///
/// An `explicit_only` pass that matches nothing in a non-empty input falls
/// back to the title heuristic, then to a random sample of the input.
pub fn explicit_filter<R: Rng>(
    tracks: Vec<Track>,
    rules: &RuleSet,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let Some(value) = rules.param(&RuleType::ExplicitFilter) else {
        return tracks;
    };
    let mode = match ExplicitMode::parse(value) {
        Some(ExplicitMode::Any) => return tracks,
        Some(mode) => mode,
        None => {
            debug!("Unknown explicit_filter value {value:?}, skipping");
            return tracks;
        }
    };

    if !ctx.diagnostics.explicit_sample_logged {
        if let Some(sample) = tracks.first() {
            debug!(
                "Explicit lookup sample: {:?} flag={:?} album_flag={:?} raw={} -> {}",
                sample.name,
                sample.explicit,
                sample.album.explicit,
                sample.raw.is_some(),
                is_explicit(sample)
            );
            ctx.diagnostics.explicit_sample_logged = true;
        }
    }

    let want_explicit = mode == ExplicitMode::ExplicitOnly;
    info!(
        "Applying explicit filter: {}",
        if want_explicit {
            "including only explicit"
        } else {
            "excluding explicit"
        }
    );

    let (kept, excluded): (Vec<Track>, Vec<Track>) = tracks
        .into_iter()
        .partition(|t| is_explicit(t) == want_explicit);
    info!("Excluded {} tracks due to explicit filter", excluded.len());

    if !want_explicit || !kept.is_empty() || excluded.is_empty() || !ctx.explicit.fallbacks {
        return kept;
    }

    // Nothing in the input is flagged explicit, the metadata is likely missing.
    let (by_title, rest): (Vec<Track>, Vec<Track>) = excluded
        .into_iter()
        .partition(|t| title_has_profanity(&t.name));
    if !by_title.is_empty() {
        ctx.diagnostics.warn(Warning::ExplicitFallback {
            fallback: ExplicitFallback::ProfanityHeuristic,
            kept: by_title.len(),
        });
        return by_title;
    }

    let sample = take_random_tracks(&rest, ctx.explicit.sample_limit, &mut ctx.rng);
    ctx.diagnostics.warn(Warning::ExplicitFallback {
        fallback: ExplicitFallback::RandomSample,
        kept: sample.len(),
    });
    sample
}
