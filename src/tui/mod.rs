//! Terminal UI for the board mirror.

mod app;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info, instrument, warn};

use crate::board::PieceRole;
use crate::board::START_POSITION;
use crate::client::EngineClient;
use crate::sync::SyncChannel;

use app::App;

/// Runs the mirror client against the engine at `server_url`.
pub async fn run_tui(server_url: String) -> Result<()> {
    // Log to a file so tracing output does not fight the alternate screen.
    let log_file = std::fs::File::create("boardmirror_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %server_url, "Starting board mirror");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let client = EngineClient::new(&server_url)?;

    // Acquire the push subscription up front; tear the terminal down on
    // every exit path, including a failed setup.
    let sync = match SyncChannel::connect(client.clone()).await {
        Ok(sync) => sync,
        Err(e) => {
            error!(error = %e, "Failed to connect to engine");
            restore_terminal(&mut terminal)?;
            return Err(e);
        }
    };

    let res = run_mirror(&mut terminal, client, &sync).await;

    // Subscription drops here with `sync`; nothing publishes after this.
    drop(sync);
    restore_terminal(&mut terminal)?;

    if let Err(err) = &res {
        error!(error = ?err, "Mirror loop error");
        eprintln!("Error: {err:?}");
    }

    res
}

fn restore_terminal<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Main display loop: apply published snapshots, draw, handle keys.
#[instrument(skip_all)]
async fn run_mirror<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    client: EngineClient,
    sync: &SyncChannel,
) -> Result<()> {
    let mut snapshots = sync.subscribe();
    let mut channel_open = true;

    let mut app = App::new();
    app.apply_snapshot(snapshots.borrow().clone());

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if channel_open {
            match snapshots.has_changed() {
                Ok(true) => {
                    let snapshot = snapshots.borrow_and_update().clone();
                    app.apply_snapshot(snapshot);
                    continue;
                }
                Ok(false) => {}
                Err(_) => {
                    warn!("Push channel closed");
                    channel_open = false;
                    app.set_status("Connection to engine lost - press q to quit");
                }
            }
        }

        // Non-blocking input poll keeps the loop responsive to pushes.
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if app.promotion().awaiting_side().is_some() {
            // The chooser is modal: only choice keys and Esc work.
            match key.code {
                KeyCode::Esc => {
                    info!("User quit during promotion");
                    return Ok(());
                }
                KeyCode::Char('q') => submit_promotion(&mut app, &client, PieceRole::Queen).await,
                KeyCode::Char('n') => submit_promotion(&mut app, &client, PieceRole::Knight).await,
                KeyCode::Char('r') => submit_promotion(&mut app, &client, PieceRole::Rook).await,
                KeyCode::Char('b') => submit_promotion(&mut app, &client, PieceRole::Bishop).await,
                _ => {}
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Ok(());
            }
            KeyCode::Char('g') => {
                info!("Requesting new game");
                if let Err(e) = client.new_game(START_POSITION).await {
                    warn!(error = %e, "New game request failed");
                    app.set_status(format!("New game failed: {e}"));
                }
            }
            _ => {}
        }
    }
}

/// Registers a promotion pick and reports it, exactly once per pick.
async fn submit_promotion(app: &mut App, client: &EngineClient, role: PieceRole) {
    let Some(choice) = app.promotion_mut().choose(role) else {
        // No promotion awaiting, or a report already in flight.
        return;
    };

    match client.report_promotion(choice).await {
        Ok(()) => {
            app.promotion_mut().report_succeeded();
            app.set_status(format!("Promoted to {:?}", choice.role));
        }
        Err(e) => {
            warn!(error = %e, "Promotion report failed");
            app.promotion_mut().report_failed();
            app.set_status(format!("Promotion report failed: {e} - pick again to retry"));
        }
    }
}
