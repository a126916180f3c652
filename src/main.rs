//! Terminal memory game runner (default binary).
//!
//! The session runs inside a [`SessionDriver`] task; this loop only turns key
//! presses into actions and redraws whenever a new snapshot is published.

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tracing::{info, warn};

use memory_match::config::AppConfig;
use memory_match::core::GameSession;
use memory_match::engine::{SessionDriver, SessionHandle};
use memory_match::input::{handle_key_event, InputHandler, UiCommand};
use memory_match::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    config.init_logging()?;

    let deck = config.load_deck().context("failed to load card deck")?;
    info!(
        cards = deck.len(),
        level = config.level,
        seeded = config.seed.is_some(),
        "memory match starting"
    );

    let session = GameSession::with_level(deck, config.random_source(), config.level);
    let driver = SessionDriver::spawn(session);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, driver.handle()).await;

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!(error = %e, "failed to restore terminal");
    }
    driver.shutdown().await?;
    info!("memory match stopped");
    result
}

async fn run(term: &mut TerminalRenderer, handle: SessionHandle) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snapshots = handle.subscribe();
    let mut events = EventStream::new();

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = snapshots.borrow_and_update().clone();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            input.sync(&snap);
            let cursor = snap.started().then(|| input.cursor());
            view.render_into(&snap, cursor, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => match handle_key_event(key) {
                    Some(UiCommand::Quit) => break,
                    Some(cmd) => {
                        if let Some(action) = input.handle(cmd, &snap) {
                            handle.send(action).await?;
                        }
                        // Cursor moves redraw without a new snapshot.
                        dirty = true;
                    }
                    None => {}
                },
                Some(Ok(Event::Resize(..))) => {
                    term.invalidate();
                    dirty = true;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },

            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                snap = snapshots.borrow_and_update().clone();
                dirty = true;
            }
        }
    }

    Ok(())
}
