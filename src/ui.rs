//! UI rendering for the playlist preview.
//!
//! This module renders the curated playlist using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::UiSettings;
use crate::filters::is_explicit;
use crate::library::{Track, format_duration_ms};

const CONTROLS: [(&str, &str); 4] = [
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("K", "details"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(key, what)| format!("[{key}] {what}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn status_text(app: &App) -> String {
    let s = &app.summary;
    let mut parts = vec![
        format!(" TRACKS: {} of {}", s.track_count, app.source_count),
        format!("DURATION: {:.1} min", s.duration_min),
        format!("ARTISTS: {}", s.artist_count),
    ];
    if let (Some(oldest), Some(newest)) = (s.oldest_year, s.newest_year) {
        parts.push(format!("YEARS: {oldest}-{newest}"));
    }
    if s.explicit_count > 0 {
        parts.push(format!("EXPLICIT: {}", s.explicit_count));
    }
    parts.push(format!("RULES: {}", s.rules_used));
    for w in &app.warnings {
        parts.push(format!("! {w}"));
    }
    parts.join(" • ")
}

fn details_text(track: &Track) -> String {
    let or_dash = |s: &str| if s.trim().is_empty() { "-".to_string() } else { s.to_string() };
    let year = track
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Title: {}\nArtist: {}\nAlbum: {}\nYear: {}\nDuration: {}\nPopularity: {}\nExplicit: {}\nSaved: {}\nUri: {}",
        or_dash(&track.name),
        or_dash(&track.artist_name),
        or_dash(&track.album.name),
        year,
        format_duration_ms(track.duration_ms),
        track.popularity,
        if is_explicit(track) { "yes" } else { "no" },
        track.saved_at.as_deref().unwrap_or("-"),
        track.uri,
    )
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Start, end and selected offset of the list window that keeps the cursor
/// centered when the list is taller than the area.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Render the preview into `frame`.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" curate ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app))
        .block(Block::bordered().padding(left_pad()).title(" summary "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    // Only build ListItems for the visible window.
    let total = app.lines.len();
    let (start, end, selected_in_window) =
        visible_window(total, chunks[2].height as usize, app.selected);
    let items: Vec<ListItem> = app.lines[start..end]
        .iter()
        .map(|line| ListItem::new(line.as_str()))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" playlist "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_in_window));
    }
    frame.render_stateful_widget(list, chunks[2], &mut state);

    if app.details_window {
        // Keep the popup inside the list area.
        let popup_area = centered_rect_sized(72, 11, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let text = app
            .selected_track()
            .map(details_text)
            .unwrap_or_else(|| "No track selected".to_string());
        let popup = Paragraph::new(text)
            .block(
                Block::default()
                    .padding(left_pad())
                    .borders(Borders::ALL)
                    .title(" details (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(popup, popup_area);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
