use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use tui_choropleth::app::App;
use tui_choropleth::config::Config;
use tui_choropleth::map::MapRenderer;
use tui_choropleth::stats::{FetchDispatcher, HttpStatsSource, StatsSource};
use tui_choropleth::store::{FetchOutcome, FetchTicket, SelectionState};
use tui_choropleth::{data, telemetry, ui};

fn main() -> Result<()> {
    let config = Config::parse();
    telemetry::init(&config.log_file)?;
    let initial = config.initial_region()?;
    info!(region = %initial.id, api = %config.api_base, policy = ?config.freshness(), "starting");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("choropleth-fetch")
        .enable_all()
        .build()?;

    let map_renderer = data::load_renderer(config.geometry.as_deref(), &runtime, config.timeout())
        .unwrap_or_else(|e| {
            warn!(error = %e, "failed to load geometry, using placeholder shapes");
            MapRenderer::placeholders()
        });

    let source = HttpStatsSource::new(&config.api_base, config.timeout())?;
    let (dispatcher, mut outcomes) = FetchDispatcher::new(source, runtime.handle().clone());
    let (selection, ticket) = SelectionState::new(initial, config.freshness());
    dispatcher.dispatch(ticket);

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let size = terminal.size()?;
    let mut app = App::new(size.width, size.height, map_renderer, selection);
    let result = run(&mut terminal, &mut app, &dispatcher, &mut outcomes);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    runtime.shutdown_timeout(Duration::from_millis(500));
    info!("exiting");
    result
}

/// Handle mouse events; returns a fetch ticket when hovering moved the selection
fn handle_mouse(app: &mut App, mouse: MouseEvent) -> Option<FetchTicket> {
    match mouse.kind {
        MouseEventKind::Moved => return app.hover(mouse.column, mouse.row),
        // Scroll wheel for zooming towards mouse position
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        // Click and drag to pan
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
    app.set_mouse_pos(mouse.column, mouse.row);
    None
}

/// Handle a key press; returns a fetch ticket when the selection moved
fn handle_key(app: &mut App, code: KeyCode) -> Option<FetchTicket> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Pan with hjkl or arrow keys
        KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
        KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
        KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
        KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

        // Zoom
        KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

        // Layer toggles
        KeyCode::Char('L') => app.map_renderer.toggle_labels(),
        KeyCode::Char('o') | KeyCode::Char('O') => app.map_renderer.toggle_outlines(),

        // Keyboard selection
        KeyCode::Char('n') | KeyCode::Tab => return app.cycle_selection(1),
        KeyCode::Char('p') | KeyCode::BackTab => return app.cycle_selection(-1),

        KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

        _ => {}
    }
    None
}

fn run<S: StatsSource>(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    dispatcher: &FetchDispatcher<S>,
    outcomes: &mut UnboundedReceiver<FetchOutcome>,
) -> Result<()> {
    loop {
        // Fold in whatever fetches resolved since the last frame
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply(outcome);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            let ticket = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key.code),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                Event::Resize(width, height) => {
                    app.resize(width, height);
                    None
                }
                _ => None,
            };
            if let Some(ticket) = ticket {
                dispatcher.dispatch(ticket);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
