//! Single-rule track filters.
//!
//! Every filter takes the working set by value and returns the survivors.
//! A filter whose parameters are absent is a no-op; one whose parameters fail
//! to parse records the failure and passes its input through unchanged.

mod artist;
mod content;
mod duration;
mod explicit;

pub use artist::{artist_counts, artist_limit, artist_limit_filter};
pub use content::{apply_content_rules, popularity_filter, release_year_filter, saved_date_filter};
pub use duration::{duration_bounds_ms, duration_filter, total_duration_ms};
pub use explicit::{
    ExplicitMode, PROFANITY_WORDS, explicit_filter, is_explicit, title_has_profanity,
};
