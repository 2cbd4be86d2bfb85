//! Error type shared by the engine, the loaders and the binary.

use std::path::PathBuf;

use crate::rules::RuleType;

#[derive(Debug, thiserror::Error)]
pub enum CurateError {
    /// The source pool was empty before any rule ran.
    #[error("no candidate tracks available in the selected source")]
    NoCandidateTracks,

    /// A rule parameter could not be coerced to the type its rule expects.
    #[error("malformed parameter for {rule}: {value:?}")]
    MalformedParameter { rule: RuleType, value: String },

    /// A `TYPE=VALUE` rule argument without the `=`.
    #[error("invalid rule {0:?}, expected TYPE=VALUE")]
    InvalidRule(String),

    #[error("failed to read track pool {path}: {source}")]
    ReadPool {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse track pool {path}: {source}")]
    ParsePool {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to read rule configuration {path}: {source}")]
    ReadRules {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse rule configuration {path}: {source}")]
    ParseRules {
        path: PathBuf,
        source: toml::de::Error,
    },
}
