use std::path::Path;

use log::info;

use crate::error::CurateError;

use super::model::Track;

/// Parse a pool from a JSON array of track records.
pub fn parse_pool(json: &str) -> Result<Vec<Track>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read the candidate pool from a JSON file.
pub fn load_pool(path: &Path) -> Result<Vec<Track>, CurateError> {
    let text = std::fs::read_to_string(path).map_err(|source| CurateError::ReadPool {
        path: path.to_path_buf(),
        source,
    })?;
    let tracks = parse_pool(&text).map_err(|source| CurateError::ParsePool {
        path: path.to_path_buf(),
        source,
    })?;

    let explicit = tracks.iter().filter(|t| t.explicit == Some(true)).count();
    info!(
        "Loaded {} tracks from {} ({} flagged explicit)",
        tracks.len(),
        path.display(),
        explicit
    );
    Ok(tracks)
}
