use iprescribe::app::{App, AppMessage};
use iprescribe::config::Config;
use iprescribe::session::{SessionStore, DATA_DIR};
use iprescribe::theme::ThemeStore;
use iprescribe::ui;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log file setup. File logging only; writing to stdout would corrupt
/// the alternate screen. `RUST_LOG` controls the filter as usual.
fn init_tracing() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let dir = home.join(DATA_DIR);
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("iprescribe.log"))
    else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .try_init();
}

/// Restore the terminal on panic so the message is readable.
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode.
fn restore_terminal<B: ratatui::backend::Backend + std::io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("iprescribe {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;
    init_tracing();
    setup_panic_hook();

    let config = Config::from_env();
    let session =
        SessionStore::new().ok_or_else(|| eyre!("could not determine home directory"))?;
    let theme = ThemeStore::new().ok_or_else(|| eyre!("could not determine home directory"))?;

    let mut app = App::new(config, session, theme);
    // A stored token skips the login screen; kick off the fetches now.
    if app.session.is_authenticated() {
        app.refresh();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app).await;

    restore_terminal(&mut terminal)?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (select! needs ownership).
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| {
                ui::render(f, &mut *app);
            })?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        let tick = tokio::time::sleep(std::time::Duration::from_millis(100));

        tokio::select! {
            _ = tick => {}

            event_result = event_stream.next() => {
                if let Some(Ok(event)) = event_result {
                    match event {
                        Event::Resize(_, _) => {
                            app.mark_dirty();
                        }
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            app.mark_dirty();
                            if key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL)
                            {
                                app.quit();
                                continue;
                            }
                            app.handle_key(key);
                        }
                        _ => {}
                    }
                }
            }

            Some(message) = recv_message(&mut message_rx) => {
                app.handle_message(message);
            }
        }
    }
}

/// Pending forever when the receiver has been taken already, so that
/// `select!` never polls a closed arm.
async fn recv_message(rx: &mut Option<mpsc::UnboundedReceiver<AppMessage>>) -> Option<AppMessage> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
