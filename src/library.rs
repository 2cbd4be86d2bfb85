//! Track records and the file-backed pool loader.

mod display;
mod load;
mod model;

pub use display::{display_from_fields, format_duration_ms};
pub use load::{load_pool, parse_pool};
pub use model::{Album, Track};
