//! Application module: exposes the model behind the playlist preview.
//!
//! The `App` model lives in `app::model` and holds the curated tracks, the
//! cursor and what the build reported.

mod model;

pub use model::*;
