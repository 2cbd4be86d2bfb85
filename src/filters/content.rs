use chrono::Duration;
use log::info;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::BuildContext;
use crate::library::Track;
use crate::rules::{RuleSet, RuleType};

use super::explicit::explicit_filter;

/// Keep tracks released within `[min_year, max_year]`.
///
/// Tracks without a parsable release date are kept.
pub fn release_year_filter<R: Rng>(
    tracks: Vec<Track>,
    rules: &RuleSet,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let (min_year, max_year) = match (
        rules.parse_param::<i32>(&RuleType::MinYear),
        rules.parse_param::<i32>(&RuleType::MaxYear),
    ) {
        (Ok(None), Ok(None)) => return tracks,
        (Ok(min), Ok(max)) => (min.unwrap_or(0), max.unwrap_or(9999)),
        (Err(err), _) | (_, Err(err)) => {
            ctx.diagnostics.malformed(err);
            return tracks;
        }
    };
    info!("Applying release year filter: {min_year} to {max_year}");

    let before = tracks.len();
    let kept: Vec<Track> = tracks
        .into_iter()
        .filter(|t| match t.year() {
            Some(year) => (min_year..=max_year).contains(&year),
            None => true,
        })
        .collect();
    info!(
        "Excluded {} tracks due to release year filter",
        before - kept.len()
    );
    kept
}

/// Keep tracks whose popularity is within `[min_popularity, max_popularity]`.
pub fn popularity_filter<R: Rng>(
    tracks: Vec<Track>,
    rules: &RuleSet,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let (min_pop, max_pop) = match (
        rules.parse_param::<u32>(&RuleType::MinPopularity),
        rules.parse_param::<u32>(&RuleType::MaxPopularity),
    ) {
        (Ok(None), Ok(None)) => return tracks,
        (Ok(min), Ok(max)) => (min.unwrap_or(0), max.unwrap_or(100)),
        (Err(err), _) | (_, Err(err)) => {
            ctx.diagnostics.malformed(err);
            return tracks;
        }
    };
    info!("Applying popularity filter: {min_pop} to {max_pop}");

    let before = tracks.len();
    let kept: Vec<Track> = tracks
        .into_iter()
        .filter(|t| (min_pop..=max_pop).contains(&t.popularity))
        .collect();
    info!(
        "Excluded {} tracks due to popularity filter",
        before - kept.len()
    );
    kept
}

/// Keep tracks saved within the last `saved_within` days.
///
/// Tracks without a save date are dropped.
pub fn saved_date_filter<R: Rng>(
    tracks: Vec<Track>,
    rules: &RuleSet,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    let days = match rules.parse_param::<i64>(&RuleType::SavedWithin) {
        Ok(Some(days)) if days > 0 => days,
        Ok(_) => return tracks,
        Err(err) => {
            ctx.diagnostics.malformed(err);
            return tracks;
        }
    };
    let Some(cutoff) = Duration::try_days(days).and_then(|d| ctx.now.checked_sub_signed(d))
    else {
        return tracks;
    };
    info!(
        "Applying saved date filter: last {days} days (since {})",
        cutoff.format("%Y-%m-%dT%H:%M:%SZ")
    );

    let before = tracks.len();
    let kept: Vec<Track> = tracks
        .into_iter()
        .filter(|t| t.saved_at().is_some_and(|saved| saved >= cutoff))
        .collect();
    info!(
        "Excluded {} tracks due to saved date filter",
        before - kept.len()
    );
    kept
}

/// Shuffle a batch, then run every content filter over it in a fixed order.
pub fn apply_content_rules<R: Rng>(
    mut tracks: Vec<Track>,
    rules: &RuleSet,
    ctx: &mut BuildContext<R>,
) -> Vec<Track> {
    tracks.shuffle(&mut ctx.rng);

    let before = tracks.len();
    let tracks = explicit_filter(tracks, rules, ctx);
    ctx.diagnostics.stage("explicit_filter", before, tracks.len());

    let before = tracks.len();
    let tracks = release_year_filter(tracks, rules, ctx);
    ctx.diagnostics.stage("release_year", before, tracks.len());

    let before = tracks.len();
    let tracks = popularity_filter(tracks, rules, ctx);
    ctx.diagnostics.stage("popularity", before, tracks.len());

    let before = tracks.len();
    let tracks = saved_date_filter(tracks, rules, ctx);
    ctx.diagnostics.stage("saved_within", before, tracks.len());

    tracks
}
