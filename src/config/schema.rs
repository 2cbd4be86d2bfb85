use std::collections::BTreeMap;

use serde::Deserialize;

use crate::engine::{BuildOptions, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TRACKS};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/curate/config.toml` or `~/.config/curate/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CURATE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineSettings,
    /// Default rules, `rule_type = "parameter"`, used when the command line
    /// names none.
    pub rules: BTreeMap<String, String>,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Upper bound on playlist length (a minimum-duration rule may exceed it).
    pub max_tracks: usize,
    /// Pools larger than this are content-filtered in batches.
    pub chunk_size: usize,
    /// Seed for a reproducible build. Unset means a fresh random seed.
    pub seed: Option<u64>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_tracks: DEFAULT_MAX_TRACKS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: None,
        }
    }
}

impl From<&EngineSettings> for BuildOptions {
    fn from(engine: &EngineSettings) -> Self {
        Self {
            max_tracks: engine.max_tracks,
            chunk_size: engine.chunk_size,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box of the preview.
    pub header_text: String,

    /// Which track fields make up a listed track, and in what order.
    ///
    /// Example: ["artist", "title", "duration"]
    pub display_fields: Vec<TrackDisplayField>,

    /// Separator used to join `display_fields`.
    pub display_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ curated for you ~ ".to_string(),
            display_fields: vec![
                TrackDisplayField::Artist,
                TrackDisplayField::Title,
                TrackDisplayField::Duration,
            ],
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    #[serde(alias = "name")]
    Title,
    Artist,
    Album,
    Uri,
    /// Track length as `M:SS`.
    Duration,
}
