use std::path::PathBuf;

use clap::Parser;

use crate::rules::Rule;

/// Command-line arguments for curate
#[derive(Parser, Debug)]
#[command(name = "curate")]
#[command(about = "Build a playlist from a track pool and a set of rules")]
#[command(version)]
pub struct Cli {
    /// JSON file holding the candidate tracks
    pub pool: PathBuf,

    /// Rule as TYPE=VALUE, e.g. artist_limit=2 (repeatable)
    #[arg(short = 'r', long = "rule", value_name = "TYPE=VALUE")]
    pub rules: Vec<Rule>,

    /// Saved rule configuration (TOML with `name` and `[[rules]]`)
    #[arg(long, env = "CURATE_RULES_FILE")]
    pub rules_file: Option<PathBuf>,

    /// Maximum number of tracks in the playlist
    #[arg(long, value_parser = parse_positive)]
    pub max_tracks: Option<usize>,

    /// Batch size for content filtering of large pools
    #[arg(long, value_parser = parse_positive)]
    pub chunk_size: Option<usize>,

    /// Seed for a reproducible build
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name used when logging the playlist summary
    #[arg(long)]
    pub name: Option<String>,

    /// Print the curated tracks as JSON
    #[arg(long, conflicts_with = "preview")]
    pub json: bool,

    /// Open an interactive preview of the playlist
    #[arg(long)]
    pub preview: bool,
}

/// Sizes must be at least 1, as in the config file.
fn parse_positive(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be >= 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
