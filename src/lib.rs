//! Rule-driven playlist curation.
//!
//! A pool of candidate tracks and a set of `rule_type -> parameter` rules go
//! in; a shuffled playlist that honors the rules as far as the pool allows
//! comes out. Filters that leave too little are relaxed by refilling from the
//! pool, so a non-empty pool always yields a non-empty playlist.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod filters;
pub mod library;
pub mod rules;
pub mod runtime;
pub mod summary;
pub mod ui;

pub use engine::{BuildContext, BuildOptions, Playlist, curate};
pub use error::CurateError;
pub use library::Track;
pub use rules::{Rule, RuleSet, categorize};
