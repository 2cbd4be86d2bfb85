use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::engine::{BuildContext, BuildOptions, Playlist, curate};
use crate::library::{display_from_fields, load_pool};
use crate::rules::{RuleConfig, RuleSet};
use crate::summary::log_summary;

mod args;
mod event_loop;
mod settings;

pub use args::Cli;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = settings::load_settings();

    let pool = load_pool(&cli.pool)?;
    let (name, rules) = resolve_rules(&cli, &settings)?;

    let mut options = BuildOptions::from(&settings.engine);
    if let Some(max_tracks) = cli.max_tracks {
        options.max_tracks = max_tracks;
    }
    if let Some(chunk_size) = cli.chunk_size {
        options.chunk_size = chunk_size;
    }

    let seed = cli
        .seed
        .or(settings.engine.seed)
        .unwrap_or_else(rand::random);
    info!("Building '{name}' with seed {seed}");
    let mut ctx = BuildContext::new(StdRng::seed_from_u64(seed));

    let playlist = curate(&pool, rules, options, &mut ctx)?;
    log_summary(&name, &playlist.tracks, &playlist.summary);
    info!(
        "Build took {:?} ({} -> {} tracks)",
        playlist.report.elapsed, playlist.report.source_count, playlist.report.final_count
    );

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&playlist.tracks)?);
    } else if cli.preview {
        preview(&playlist, &settings)?;
    } else {
        print_playlist(&playlist, &settings.ui);
    }
    Ok(())
}

/// Rules from the saved configuration, overridden by `-r` arguments. With
/// neither, the `[rules]` table of the settings applies.
fn resolve_rules(
    cli: &Cli,
    settings: &config::Settings,
) -> Result<(String, RuleSet), Box<dyn std::error::Error>> {
    let saved = cli
        .rules_file
        .as_deref()
        .map(RuleConfig::load)
        .transpose()?;

    let mut name = cli.name.clone();
    let mut rules = RuleSet::new();
    if let Some(saved) = &saved {
        name = name.or_else(|| Some(saved.name.clone()).filter(|n| !n.is_empty()));
        rules = RuleSet::from(saved);
    }
    for rule in &cli.rules {
        rules.insert(rule.rule_type.clone(), rule.parameter.clone());
    }
    if saved.is_none() && cli.rules.is_empty() {
        rules = RuleSet::from(settings.rules.clone());
    }

    Ok((name.unwrap_or_else(|| "curated".to_string()), rules))
}

fn print_playlist(playlist: &Playlist, ui: &config::UiSettings) {
    for (i, track) in playlist.tracks.iter().enumerate() {
        println!(
            "{:>3}. {}",
            i + 1,
            display_from_fields(track, &ui.display_fields, &ui.display_separator)
        );
    }

    let s = &playlist.summary;
    println!();
    println!(
        "{} tracks, {:.1} min, {} artists, {} explicit",
        s.track_count, s.duration_min, s.artist_count, s.explicit_count
    );
    for warning in &playlist.report.warnings {
        println!("warning: {warning}");
    }
}

fn preview(playlist: &Playlist, settings: &config::Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(playlist, &settings.ui);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, settings, &mut app, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
