use crate::config::TrackDisplayField;

use super::model::Track;

/// Format a duration in milliseconds as `M:SS`.
pub fn format_duration_ms(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Build a display string for a track according to the provided `fields` and separator.
///
/// Empty metadata fields are skipped; when nothing is produced the track name
/// (or the uri, for unnamed tracks) is used.
pub fn display_from_fields(track: &Track, fields: &[TrackDisplayField], sep: &str) -> String {
    let mut parts: Vec<String> = Vec::new();

    for f in fields {
        match f {
            TrackDisplayField::Title => {
                if !track.name.trim().is_empty() {
                    parts.push(track.name.trim().to_string());
                }
            }
            TrackDisplayField::Artist => {
                let a = track.artist_name.trim();
                if !a.is_empty() {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Album => {
                let a = track.album.name.trim();
                if !a.is_empty() {
                    parts.push(a.to_string());
                }
            }
            TrackDisplayField::Uri => parts.push(track.uri.clone()),
            TrackDisplayField::Duration => parts.push(format_duration_ms(track.duration_ms)),
        }
    }

    if !parts.is_empty() {
        parts.join(sep)
    } else if !track.name.trim().is_empty() {
        track.name.clone()
    } else {
        track.uri.clone()
    }
}
