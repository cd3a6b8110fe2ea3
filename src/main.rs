mod app;
mod blob;
mod cli;
mod clipboard;
mod codegen;
mod color;
mod editor;
mod export;
mod follow;
mod gradient;
mod preview;
mod settings;
mod ui;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use app::{App, Screen};
use cli::{Cli, Commands};
use clipboard::{ClipboardSink, SystemClipboard};
use codegen::Bundle;
use editor::PickerMode;
use gradient::GradientConfig;

/// One animation frame; the follow loop ticks at most once per frame.
const FRAME: Duration = Duration::from_millis(33);

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            init_logging(true);
            run_tui()
        }
        Some(cmd) => {
            init_logging(false);
            dispatch_command(cmd)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

fn log_level() -> TraceLevel {
    match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

/// The studio owns the terminal, so it logs to a file; subcommands log to
/// stderr.
fn init_logging(to_file: bool) {
    let builder = FmtSubscriber::builder().with_max_level(log_level());
    let result = if to_file {
        match open_log_file() {
            Ok(file) => tracing::subscriber::set_global_default(
                builder.with_ansi(false).with_writer(Mutex::new(file)).finish(),
            ),
            Err(_) => {
                tracing::subscriber::set_global_default(builder.with_writer(io::sink).finish())
            }
        }
    } else {
        tracing::subscriber::set_global_default(builder.with_writer(io::stderr).finish())
    };
    if let Err(e) = result {
        eprintln!("warning: logging disabled: {}", e);
    }
}

fn open_log_file() -> Result<fs::File> {
    fs::create_dir_all(settings::base_dir()).context("Failed to create config directory")?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(settings::log_path())
        .context("Failed to open log file")
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn dispatch_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Generate { part, config } => {
            let config = config.resolve()?;
            let bundle = Bundle::new(&config);
            let text = bundle.text(part).ok_or_else(|| {
                anyhow!(
                    "{} is only generated with mouse interaction enabled",
                    part.label()
                )
            })?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
        Commands::Export { dir, config } => {
            let config = config.resolve()?;
            let dir = dir.unwrap_or_else(|| settings::load().export_dir());
            let paths = export::export_all(&config, &dir)?;
            for path in &paths {
                println!("  {}", path.display());
            }
            println!("{}", export::summary(&paths, &dir));
            Ok(())
        }
        Commands::Defaults => {
            let json = serde_json::to_string_pretty(&GradientConfig::default())?;
            println!("{}", json);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Studio
// ---------------------------------------------------------------------------

fn run_tui() -> Result<()> {
    let settings = settings::load();

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(GradientConfig::default(), &settings);
    let mut clipboard = SystemClipboard::new();
    info!("studio started, exports go to {}", app.export_dir.display());

    let result = run_app(&mut terminal, &mut app, &mut clipboard);

    // Cleanup
    app.cleanup();
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    clipboard: &mut dyn ClipboardSink,
) -> Result<()> {
    let mut last_frame: Option<Instant> = None;
    loop {
        let now = Instant::now();
        if last_frame.map_or(true, |at| now.duration_since(at) >= FRAME) {
            app.tick(now);
            last_frame = Some(now);
        }

        terminal.draw(|f| ui::render(f, app))?;

        let elapsed = last_frame.map(|at| at.elapsed()).unwrap_or_default();
        if event::poll(FRAME.saturating_sub(elapsed))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(app, key, clipboard);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    handle_mouse(app, mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, clipboard: &mut dyn ClipboardSink) {
    // Clear status message on any keypress
    app.status_message = None;

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        Screen::Help => app.close_overlay(),
        Screen::Export => handle_export_input(app, key.code, clipboard),
        Screen::Studio if app.editor.editing => handle_picker_input(app, key),
        Screen::Studio => handle_panel_input(app, key),
    }
}

fn step(key: &KeyEvent) -> f64 {
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        10.0
    } else {
        1.0
    }
}

fn handle_panel_input(app: &mut App, key: KeyEvent) {
    let step = step(&key);
    match key.code {
        KeyCode::Tab => app.toggle_panel(),
        KeyCode::Char('e') => app.open_export(),
        KeyCode::Char('r') => app.reset(),
        KeyCode::Char('?') => app.screen = Screen::Help,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ if app.panel_collapsed => {}
        KeyCode::Char('j') | KeyCode::Down => app.editor.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.editor.select_prev(),
        KeyCode::Char('h') | KeyCode::Left => {
            let update = app.editor.adjust(&app.config, -step);
            app.apply(update);
        }
        KeyCode::Char('H') => {
            let update = app.editor.adjust(&app.config, -10.0);
            app.apply(update);
        }
        KeyCode::Char('l') | KeyCode::Right => {
            let update = app.editor.adjust(&app.config, step);
            app.apply(update);
        }
        KeyCode::Char('L') => {
            let update = app.editor.adjust(&app.config, 10.0);
            app.apply(update);
        }
        KeyCode::Enter => {
            let update = app.editor.activate(&app.config);
            app.apply(update);
        }
        _ => {}
    }
}

fn handle_picker_input(app: &mut App, key: KeyEvent) {
    match app.editor.picker_mode {
        PickerMode::Slider => {
            let step = step(&key);
            match key.code {
                KeyCode::Left | KeyCode::Char('h') => {
                    let update = app.editor.adjust_slider(-step);
                    app.apply(update);
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    let update = app.editor.adjust_slider(step);
                    app.apply(update);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    app.editor.slider_focus = app.editor.slider_focus.prev();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.editor.slider_focus = app.editor.slider_focus.next();
                }
                KeyCode::Tab => app.editor.toggle_picker_mode(),
                KeyCode::Esc | KeyCode::Enter => app.editor.close_picker(),
                _ => {}
            }
        }
        PickerMode::HexInput => match key.code {
            KeyCode::Enter => match app.editor.commit_hex_input() {
                Some(update) => app.apply(update),
                None => {
                    app.status_message = Some("Invalid hex color, expected #rrggbb".to_string());
                }
            },
            KeyCode::Backspace => app.editor.pop_hex_char(),
            KeyCode::Tab => app.editor.toggle_picker_mode(),
            KeyCode::Esc => app.editor.close_picker(),
            KeyCode::Char(c) => app.editor.push_hex_char(c),
            _ => {}
        },
    }
}

fn handle_export_input(app: &mut App, key: KeyCode, clipboard: &mut dyn ClipboardSink) {
    match key {
        KeyCode::Char('j') | KeyCode::Down => app.export_next(),
        KeyCode::Char('k') | KeyCode::Up => app.export_prev(),
        KeyCode::Enter | KeyCode::Char('y') => app.copy_selected(clipboard, Instant::now()),
        KeyCode::Char('w') => app.write_exports(),
        KeyCode::PageDown => app.scroll_export(10),
        KeyCode::PageUp => app.scroll_export(-10),
        KeyCode::Esc | KeyCode::Char('q') => app.close_overlay(),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            if let Some((x, y)) =
                ui::preview::cell_to_viewport(mouse.column, mouse.row, area, preview::VIEWPORT)
            {
                app.on_pointer(x, y);
            }
        }
        MouseEventKind::Down(MouseButton::Left) if app.screen == Screen::Studio => {
            let layout = ui::get_layout_rects(area, app.panel_collapsed, app.editor.editing);
            let Some(inner) = layout.panel_inner else {
                return;
            };
            let inside = mouse.column >= inner.x
                && mouse.column < inner.x + inner.width
                && mouse.row >= inner.y
                && mouse.row < inner.y + inner.height;
            if !inside {
                return;
            }
            if let Some(index) = ui::panel::field_at_row(mouse.row - inner.y) {
                app.editor.select(index);
            }
        }
        MouseEventKind::ScrollDown if app.screen == Screen::Export => app.scroll_export(3),
        MouseEventKind::ScrollUp if app.screen == Screen::Export => app.scroll_export(-3),
        _ => {}
    }
}
