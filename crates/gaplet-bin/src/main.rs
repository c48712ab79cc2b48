//! CLI entry point: argument parsing, logging setup, terminal lifecycle, and
//! the poll/dispatch/repaint loop that ties the event bus, background input
//! producer, and layout tree together.

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::context::EditorContext;
use core_actions::handlers::{
    state_mode_handler, submitted_command_handler, tab_edit_handler, window_global_handler,
};
use core_events::{Event, EventBus, KeyCode, KeyTarget, Mode, Topic};
use core_input::Signal;
use core_layout::Element;
use core_model::{Tab, Window};
use core_render::{Point, Screen, Size};
use core_state::State;
use core_terminal::CrosstermBackend;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gaplet", about = "A modal terminal text editor")]
struct Cli {
    /// File to open. Omitted: start with one empty tab named "new tab".
    path: Option<PathBuf>,
    /// Optional TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Append-only file logging, matching the reference logger's lazily opened,
/// never-rolled append semantics.
fn configure_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "log.txt");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .init();
    guard
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(target: "panic", "{info}");
        default_hook(info);
    }));
}

fn build_window(path: Option<PathBuf>, gap_capacity: usize) -> Result<Window> {
    match path {
        None => Ok(Window::with_capacity(gap_capacity)),
        Some(path) => {
            if path.is_dir() {
                anyhow::bail!("cannot open a directory: {}", path.display());
            }
            Ok(Window::with_tab(Tab::open_or_empty(&path)))
        }
    }
}

fn key_target_for(mode: Mode) -> KeyTarget {
    match mode {
        Mode::View => KeyTarget::None,
        Mode::Insert => KeyTarget::Tab,
        Mode::Command => KeyTarget::State,
    }
}

fn repaint(ctx: &EditorContext, size: Size) -> Result<()> {
    let mut screen = Screen::new(size.width, size.height);
    ctx.window.render(&mut screen, Point::new(0, 0));
    ctx.state.render(&mut screen, Point::new(0, size.height.saturating_sub(1)));
    screen.build_writer().flush()?;
    Ok(())
}

fn layout(ctx: &mut EditorContext, size: Size) {
    ctx.window.set_assigned_size(Size::new(size.width, size.height.saturating_sub(1)));
    ctx.state.set_assigned_size(Size::new(size.width, 1));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = configure_logging();
    install_panic_hook();

    let config = core_config::load_from(cli.config.clone()).context("loading configuration")?;
    let window = build_window(cli.path, config.gap_capacity).context("opening initial file")?;
    let state = State::new();
    let mut ctx = EditorContext::new(window, state, config);

    let mut backend = CrosstermBackend::new();
    let _guard = backend.enter_guard().context("initializing terminal")?;

    let (signal_tx, signal_rx) = crossbeam_channel::unbounded::<Signal>();
    core_input::spawn_terminal_reader(signal_tx.clone());

    let mut bus: EventBus<EditorContext> = EventBus::new();
    bus.subscribe(Topic::Key, window_global_handler);
    bus.subscribe(Topic::Key, state_mode_handler);
    bus.subscribe(Topic::Key, tab_edit_handler);
    bus.subscribe(Topic::SubmittedCommand, submitted_command_handler);

    let (term_width, term_height) = core_terminal::terminal_size()?;
    let mut size = Size::new(term_width, term_height);
    layout(&mut ctx, size);
    repaint(&ctx, size)?;

    while !ctx.state.is_finished() {
        let signal = match signal_rx.recv() {
            Ok(signal) => signal,
            Err(_) => break,
        };

        match signal {
            Signal::Resize(w, h) => {
                size = Size::new(w, h);
                layout(&mut ctx, size);
            }
            Signal::ToastExpired(generation) => {
                ctx.state.clear_toast_if_current(generation);
            }
            Signal::Key(key) => {
                if key.is_ctrl('c') {
                    break;
                }
                let moved = match key.code {
                    KeyCode::Left => Some((-1, 0)),
                    KeyCode::Right => Some((1, 0)),
                    KeyCode::Up => Some((0, -1)),
                    KeyCode::Down => Some((0, 1)),
                    _ => None,
                };
                if let Some((dx, dy)) = moved {
                    ctx.window.active_tab_mut().move_cursor(dx, dy);
                } else {
                    let target = key_target_for(ctx.state.mode());
                    let toast_before = ctx.state.toast().map(|t| t.generation);
                    bus.emit(Event::Key { target, key }, &mut ctx);
                    while let Some(followup) = ctx.pending.pop_front() {
                        bus.emit(followup, &mut ctx);
                    }
                    if let Some(toast) = ctx.state.toast() {
                        if Some(toast.generation) != toast_before {
                            let duration = Duration::from_millis(ctx.config.toast_duration_ms);
                            core_input::spawn_toast_timer(signal_tx.clone(), toast.generation, duration);
                        }
                    }
                }
            }
        }

        if !ctx.state.is_finished() {
            repaint(&ctx, size)?;
        }
    }

    Ok(())
}
