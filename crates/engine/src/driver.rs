//! Session driver - one task owns the session, everything else talks to it.
//!
//! Commands arrive on a bounded mpsc channel; snapshots leave on a watch
//! channel. The task sleeps until either the next command or the session's
//! next timer deadline, advances the session clock, then applies the command.
//! Timers therefore fire before any input that arrives after them, and no two
//! transitions ever interleave.

use std::ops::Deref;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::core::{GameSession, RandomSource, SessionSnapshot};
use crate::types::{CardId, GameAction};

/// Driver errors.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The driver task has exited; the command was not delivered.
    #[error("session driver has stopped")]
    Closed,

    /// The command queue is full (only from `try_send`).
    #[error("session driver command queue is full")]
    Busy,

    /// The driver task panicked or was aborted.
    #[error("session driver task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Driver configuration
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Commands buffered before `send` waits.
    pub command_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            command_capacity: 32,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum DriverCommand {
    Action(GameAction),
    Shutdown,
}

/// Cloneable access to a running driver.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<DriverCommand>,
    snapshot_rx: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Queue an action, waiting for room in the command queue.
    pub async fn send(&self, action: GameAction) -> Result<(), DriverError> {
        self.cmd_tx
            .send(DriverCommand::Action(action))
            .await
            .map_err(|_| DriverError::Closed)
    }

    /// Queue an action without waiting.
    pub fn try_send(&self, action: GameAction) -> Result<(), DriverError> {
        self.cmd_tx
            .try_send(DriverCommand::Action(action))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => DriverError::Busy,
                mpsc::error::TrySendError::Closed(_) => DriverError::Closed,
            })
    }

    pub async fn start_game(&self) -> Result<(), DriverError> {
        self.send(GameAction::StartGame).await
    }

    pub async fn stop_game(&self) -> Result<(), DriverError> {
        self.send(GameAction::StopGame).await
    }

    pub async fn tap_card(&self, card_id: CardId) -> Result<(), DriverError> {
        self.send(GameAction::TapCard(card_id)).await
    }

    pub async fn next_level(&self) -> Result<(), DriverError> {
        self.send(GameAction::NextLevel).await
    }

    pub async fn restart_level(&self) -> Result<(), DriverError> {
        self.send(GameAction::RestartLevel).await
    }

    pub async fn close_popup(&self) -> Result<(), DriverError> {
        self.send(GameAction::ClosePopup).await
    }

    /// Latest published read model.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_rx.clone()
    }
}

/// Running driver instance.
pub struct SessionDriver {
    handle: SessionHandle,
    task: JoinHandle<()>,
}

impl SessionDriver {
    /// Spawn the owning task on the current tokio runtime.
    pub fn spawn<R>(session: GameSession<R>) -> Self
    where
        R: RandomSource + Send + 'static,
    {
        Self::spawn_with(session, DriverConfig::default())
    }

    pub fn spawn_with<R>(session: GameSession<R>, config: DriverConfig) -> Self
    where
        R: RandomSource + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel(config.command_capacity.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());

        info!(
            level = session.level(),
            capacity = config.command_capacity,
            "session driver starting"
        );
        let task = tokio::spawn(run(session, cmd_rx, snapshot_tx));

        Self {
            handle: SessionHandle {
                cmd_tx,
                snapshot_rx,
            },
            task,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Stop the task and wait for it to exit.
    pub async fn shutdown(self) -> Result<(), DriverError> {
        // A closed channel means the task is already gone; joining still reports panics.
        let _ = self.handle.cmd_tx.send(DriverCommand::Shutdown).await;
        self.task.await?;
        Ok(())
    }
}

impl Deref for SessionDriver {
    type Target = SessionHandle;

    fn deref(&self) -> &SessionHandle {
        &self.handle
    }
}

async fn run<R: RandomSource>(
    mut session: GameSession<R>,
    mut cmd_rx: mpsc::Receiver<DriverCommand>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
) {
    let mut clock = Instant::now();

    loop {
        let deadline = session
            .next_timer_ms()
            .map(|ms| clock + Duration::from_millis(u64::from(ms)));

        // `None` means a timer deadline woke us.
        let received = tokio::select! {
            cmd = cmd_rx.recv() => Some(cmd),
            _ = sleep_until(deadline.unwrap_or(clock)), if deadline.is_some() => None,
        };

        let mut changed = advance_clock(&mut session, &mut clock);

        match received {
            None => {}
            Some(None) | Some(Some(DriverCommand::Shutdown)) => break,
            Some(Some(DriverCommand::Action(action))) => {
                let applied = session.apply_action(action);
                debug!(action = action.as_str(), applied, "command");
                changed |= applied;
            }
        }

        if changed {
            snapshot_tx.send_modify(|snap| session.snapshot_into(snap));
        }
    }

    info!(
        level = session.level(),
        phase = session.phase().as_str(),
        "session driver stopped"
    );
}

/// Feed whole elapsed milliseconds into the session, carrying the remainder.
fn advance_clock<R: RandomSource>(session: &mut GameSession<R>, clock: &mut Instant) -> bool {
    let elapsed = Instant::now().saturating_duration_since(*clock);
    let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
    *clock += Duration::from_millis(u64::from(ms));
    session.advance(ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deck, SimpleRng};
    use crate::types::{Outcome, Phase};
    use tokio::time::sleep;
    use tokio_test::assert_ok;

    fn driver(seed: u32) -> SessionDriver {
        SessionDriver::spawn(GameSession::new(Deck::builtin(), SimpleRng::new(seed)))
    }

    async fn started(seed: u32) -> (SessionDriver, SessionSnapshot) {
        let driver = driver(seed);
        let mut rx = driver.subscribe();
        assert_ok!(driver.start_game().await);
        let snap = rx.wait_for(|s| s.phase == Phase::Playing).await.unwrap().clone();
        (driver, snap)
    }

    #[tokio::test(start_paused = true)]
    async fn initial_snapshot_is_home() {
        let driver = driver(1);
        let snap = driver.snapshot();
        assert_eq!(snap.phase, Phase::Home);
        assert_eq!(snap.time_remaining, 300);
        assert_ok!(driver.shutdown().await);
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_runs_once_per_second() {
        let (driver, snap) = started(1).await;
        assert_eq!(snap.time_remaining, 300);

        sleep(Duration::from_millis(3_500)).await;
        assert_eq!(driver.snapshot().time_remaining, 297);
        assert_ok!(driver.shutdown().await);
    }

    #[tokio::test(start_paused = true)]
    async fn mismatch_clears_after_reveal_delay() {
        let (driver, snap) = started(7).await;
        let a = &snap.board[0];
        let b = snap.board.iter().find(|c| c.pair_id != a.pair_id).unwrap();

        let mut rx = driver.subscribe();
        assert_ok!(driver.tap_card(a.id).await);
        assert_ok!(driver.tap_card(b.id).await);
        rx.wait_for(|s| s.incorrect == 1).await.unwrap();
        assert_eq!(driver.snapshot().flipped.len(), 2);

        sleep(Duration::from_millis(400)).await;
        assert_eq!(driver.snapshot().flipped.len(), 2);

        sleep(Duration::from_millis(200)).await;
        assert!(driver.snapshot().flipped.is_empty());
        assert_ok!(driver.shutdown().await);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_countdown() {
        let (driver, _) = started(2).await;
        sleep(Duration::from_millis(2_500)).await;
        assert_ok!(driver.stop_game().await);
        let mut rx = driver.subscribe();
        rx.wait_for(|s| s.phase == Phase::Resolved).await.unwrap();

        sleep(Duration::from_secs(10)).await;
        let snap = driver.snapshot();
        assert_eq!(snap.time_remaining, 298);
        assert_eq!(snap.outcome, Some(Outcome::GameOver));
        assert_eq!(snap.timers.tick_ms, None);
        assert_ok!(driver.shutdown().await);
    }

    #[tokio::test(start_paused = true)]
    async fn time_out_resolves_game_over() {
        let (driver, _) = started(3).await;
        sleep(Duration::from_secs(301)).await;

        let snap = driver.snapshot();
        assert_eq!(snap.time_remaining, 0);
        assert_eq!(snap.phase, Phase::Resolved);
        assert_eq!(snap.outcome, Some(Outcome::GameOver));

        assert_ok!(driver.close_popup().await);
        let mut rx = driver.subscribe();
        let home = rx.wait_for(|s| s.phase == Phase::Home).await.unwrap().clone();
        assert_eq!(home.level, 1);
        assert_eq!(home.time_remaining, 300);
        assert_ok!(driver.shutdown().await);
    }

    #[tokio::test(start_paused = true)]
    async fn handle_reports_closed_after_shutdown() {
        let driver = driver(4);
        let handle = driver.handle();
        assert_ok!(driver.shutdown().await);

        assert!(matches!(
            handle.send(GameAction::StartGame).await,
            Err(DriverError::Closed)
        ));
        assert!(matches!(
            handle.try_send(GameAction::StartGame),
            Err(DriverError::Closed)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn ignored_actions_publish_nothing() {
        let driver = driver(5);
        let mut rx = driver.subscribe();
        let _ = rx.borrow_and_update();

        assert_ok!(driver.stop_game().await);
        assert_ok!(driver.next_level().await);
        sleep(Duration::from_millis(10)).await;
        assert!(!rx.has_changed().unwrap());
        assert_ok!(driver.shutdown().await);
    }
}
