//! Preview model: the curated playlist, its summary and the cursor.

use crate::config::UiSettings;
use crate::engine::{Playlist, Warning};
use crate::library::{Track, display_from_fields};
use crate::summary::PlaylistSummary;

/// State behind the playlist preview.
pub struct App {
    pub tracks: Vec<Track>,
    /// One rendered line per track, built once from the display settings.
    pub lines: Vec<String>,
    pub selected: usize,
    pub summary: PlaylistSummary,
    pub warnings: Vec<Warning>,
    /// Size of the pool the playlist was curated from.
    pub source_count: usize,
    pub details_window: bool,
}

impl App {
    pub fn new(playlist: &Playlist, ui: &UiSettings) -> Self {
        let lines = playlist
            .tracks
            .iter()
            .map(|t| display_from_fields(t, &ui.display_fields, &ui.display_separator))
            .collect();

        Self {
            tracks: playlist.tracks.clone(),
            lines,
            selected: 0,
            summary: playlist.summary.clone(),
            warnings: playlist.report.warnings.clone(),
            source_count: playlist.report.source_count,
            details_window: false,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.tracks.is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks.get(self.selected)
    }

    pub fn toggle_details_window(&mut self) {
        self.details_window = !self.details_window;
    }

    /// Move to the next track, wrapping to the first.
    pub fn next(&mut self) {
        if self.has_tracks() {
            self.selected = (self.selected + 1) % self.tracks.len();
        }
    }

    /// Move to the previous track, wrapping to the last.
    pub fn prev(&mut self) {
        if self.has_tracks() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.tracks.len() - 1);
        }
    }

    pub fn top(&mut self) {
        self.selected = 0;
    }

    pub fn bottom(&mut self) {
        self.selected = self.tracks.len().saturating_sub(1);
    }
}
