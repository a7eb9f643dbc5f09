//! Interactive terminal front end.
//!
//! Terminal input is read on a dedicated thread and forwarded over a tokio
//! channel, so the main task can wait on keystrokes, suggestion completions
//! and the redraw tick at the same time. All state changes happen on the
//! main task.

mod app;
mod ui;

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::Show,
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use grt_tracker::{EventDispatcher, GoalTracker, TracingSink, TrackerConfig};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use app::App;

const TICK_RATE: Duration = Duration::from_millis(250);

pub async fn run(config: &TrackerConfig) -> anyhow::Result<()> {
    let mut dispatcher = EventDispatcher::new();
    dispatcher.add_sink(Box::new(TracingSink));
    let tracker = GoalTracker::from_config(config)?.with_dispatcher(dispatcher);
    tracing::info!(
        provider = tracker.provider_name(),
        stale_results = ?tracker.stale_policy(),
        "starting terminal UI"
    );

    let mut terminal = init_terminal()?;
    install_panic_hook();

    let result = event_loop(&mut terminal, App::new(tracker, config.display.color)).await;

    // Restore even when the loop failed; the loop error wins.
    let restored = reset_terminal(terminal.backend_mut());
    result?;
    Ok(restored?)
}

fn init_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste) {
        let _ = reset_terminal(&mut stdout);
        return Err(e.into());
    }
    match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = reset_terminal(&mut io::stdout());
            Err(e.into())
        }
    }
}

/// Put the terminal back the way the shell expects it before the default
/// panic message is printed.
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = reset_terminal(&mut io::stdout());
        original(info);
    }));
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
fn reset_terminal(out: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    write_restore_sequence(out)
}

fn write_restore_sequence(out: &mut impl Write) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableBracketedPaste, Show)
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    let mut input = spawn_input_reader();
    let mut tick = tokio::time::interval(TICK_RATE);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            event = input.recv() => match event {
                Some(event) => app.handle_event(event),
                None => {
                    tracing::warn!("terminal input closed");
                    app.should_quit = true;
                }
            },
            Some(completion) = app.tracker.next_completion() => app.on_completion(completion),
            _ = tick.tick() => app.on_tick(),
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!("terminal UI exiting");
    Ok(())
}

/// Forward terminal events from a blocking reader thread.
///
/// The thread ends when the receiver is dropped and the next event arrives,
/// or when reading fails.
fn spawn_input_reader() -> mpsc::UnboundedReceiver<Event> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!("terminal read error: {}", e);
                break;
            }
        }
    });
    rx
}
