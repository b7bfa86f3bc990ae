//! A single-page portfolio for the terminal.
//!
//! The page scrolls like a web page: a fixed navigation header highlights
//! the section in view, and picking a section glides there with an eased
//! smooth scroll.  Run with `--print-config` to dump the effective settings.

mod app;
mod config;
mod content;
mod core;
mod error;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Frame, Terminal};
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::spawn_event_reader,
    handler,
    state::AppState,
};
use crate::config::{Action, AppConfig};
use crate::content::Portfolio;
use crate::core::{section::SectionId, viewport::Viewport};
use crate::ui::{nav::NavBar, page::PageView, theme::Theme};

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Single-page terminal portfolio")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/folio/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Portfolio content as TOML (defaults to the built-in sample).
    #[arg(long)]
    content: Option<PathBuf>,

    /// Smooth scroll to this section right after start-up.
    #[arg(long)]
    section: Option<String>,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = state.layout;
    let active = state.active.borrow().clone();

    frame.render_widget(
        NavBar {
            registry: state.registry(),
            brand: &state.portfolio.name,
            active: active.as_ref(),
            hovered: state.hovered_nav,
        },
        layout.nav_area,
    );

    frame.render_widget(
        PageView::new(&state.page, state.viewport.scroll_offset()),
        layout.page_area,
    );

    let position = match state.scrolling_to() {
        Some(label) => format!("→ {label}"),
        None => {
            let max = state.viewport.max_offset();
            let pct = if max > 0.0 {
                (state.viewport.scroll_offset() / max * 100.0).round()
            } else {
                100.0
            };
            format!("{pct:.0}%")
        }
    };
    let keys = &state.keymap;
    let status = format!(
        " {}/{}: scroll | {}/{}: section | 1-{}: jump | {}: quit   {position}",
        keys.short_binding(Action::ScrollUp),
        keys.short_binding(Action::ScrollDown),
        keys.short_binding(Action::PrevSection),
        keys.short_binding(Action::NextSection),
        state.registry().len(),
        keys.short_binding(Action::Quit),
    );
    frame.render_widget(
        Paragraph::new(status).style(Theme::status_bar_style()),
        layout.status_area,
    );
}

// ───────────────────────────────────────── main loop ─────────

async fn run(terminal: &mut Tui, state: &mut AppState, initial: Option<SectionId>) -> Result<()> {
    let size = terminal.size()?;
    state.resize(size.width, size.height);
    state.mount();
    if let Some(id) = initial {
        state.scroll_to_section(&id);
    }

    let mut events = spawn_event_reader(Duration::from_millis(50));
    let mut frames = tokio::time::interval(state.config.frame_interval());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if state.dirty {
            state.dirty = false;
            terminal.draw(|frame| draw(frame, state))?;
        }

        tokio::select! {
            biased;

            event = events.recv() => handler::handle_event(state, event),

            _ = frames.tick() => state.on_frame(Instant::now()),
        }

        if state.should_quit {
            break;
        }
    }

    state.unmount();
    Ok(())
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let portfolio = match &cli.content {
        Some(path) => Portfolio::load_from_path(path)?,
        None => Portfolio::sample(),
    };
    info!(
        name = %portfolio.name,
        frame_ms = config.frame.frame_ms,
        easing = config.scroll.easing.label(),
        "starting folio"
    );

    let mut state = AppState::new(portfolio, config);
    let initial = cli.section.map(SectionId::new);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut state, initial).await;

    // ── teardown (runs even when the loop failed) ─────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
