//! Configuration loader and schema types.
//!
//! Settings cover the engine's size parameters, a table of default rules and
//! how the binary renders tracks.

mod load;
mod schema;

pub use schema::*;
