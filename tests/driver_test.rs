//! Session driver under paused tokio time.

use std::time::Duration;

use memory_match::core::{Deck, GameSession, SessionSnapshot, SimpleRng};
use memory_match::engine::{DriverConfig, DriverError, SessionDriver};
use memory_match::types::{GameAction, Outcome, Phase};
use tokio::time::sleep;
use tokio_test::assert_ok;

fn spawn(level: u32) -> SessionDriver {
    SessionDriver::spawn(GameSession::with_level(
        Deck::builtin(),
        SimpleRng::new(2024),
        level,
    ))
}

async fn wait(driver: &SessionDriver, f: impl FnMut(&SessionSnapshot) -> bool) -> SessionSnapshot {
    let mut rx = driver.subscribe();
    let snap = rx.wait_for(f).await.expect("driver stopped");
    snap.clone()
}

#[tokio::test(start_paused = true)]
async fn full_level_then_next_level() {
    let driver = spawn(1);
    assert_ok!(driver.start_game().await);
    let snap = wait(&driver, |s| s.started()).await;

    let mut cards: Vec<_> = snap.board.iter().map(|c| (c.pair_id, c.id)).collect();
    cards.sort_unstable();
    for (_, id) in cards {
        assert_ok!(driver.tap_card(id).await);
    }

    let done = wait(&driver, |s| s.ended()).await;
    assert_eq!(done.outcome, Some(Outcome::LevelComplete));
    assert_eq!(done.score, 2);

    // The countdown stays frozen while the popup is up.
    sleep(Duration::from_secs(5)).await;
    assert_eq!(driver.snapshot().time_remaining, done.time_remaining);

    assert_ok!(driver.next_level().await);
    let next = wait(&driver, |s| s.level == 2 && s.started()).await;
    assert_eq!(next.board.len(), 8);
    assert_eq!(next.time_remaining, 270);

    sleep(Duration::from_millis(2_001)).await;
    assert_eq!(driver.snapshot().time_remaining, 268);
    assert_ok!(driver.shutdown().await);
}

#[tokio::test(start_paused = true)]
async fn mismatch_then_stop_cancels_reveal() {
    let driver = spawn(1);
    assert_ok!(driver.start_game().await);
    let snap = wait(&driver, |s| s.started()).await;

    let a = &snap.board[0];
    let b = snap.board.iter().find(|c| c.pair_id != a.pair_id).unwrap();
    assert_ok!(driver.tap_card(a.id).await);
    assert_ok!(driver.tap_card(b.id).await);
    assert_ok!(driver.stop_game().await);

    let ended = wait(&driver, |s| s.ended()).await;
    assert_eq!(ended.incorrect, 1);
    assert_eq!(ended.timers.mismatch_ms, None);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(driver.snapshot().flipped.len(), 2);
    assert_ok!(driver.shutdown().await);
}

#[tokio::test(start_paused = true)]
async fn commands_are_applied_in_order() {
    let driver = spawn(1);
    let handle = driver.handle();
    for action in [
        GameAction::StartGame,
        GameAction::StopGame,
        GameAction::ClosePopup,
        GameAction::StartGame,
    ] {
        assert_ok!(handle.send(action).await);
    }

    let snap = wait(&driver, |s| s.started() && s.incarnation >= 3).await;
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.time_remaining, 300);
    assert_ok!(driver.shutdown().await);
}

#[tokio::test(start_paused = true)]
async fn try_send_reports_full_queue() {
    let driver = SessionDriver::spawn_with(
        GameSession::new(Deck::builtin(), SimpleRng::new(1)),
        DriverConfig {
            command_capacity: 1,
        },
    );

    // The driver task has not run yet, so the single slot fills up.
    assert_ok!(driver.try_send(GameAction::StartGame));
    assert!(matches!(
        driver.try_send(GameAction::StopGame),
        Err(DriverError::Busy)
    ));
    assert_ok!(driver.shutdown().await);
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_driver() {
    let driver = spawn(1);
    let mut rx = driver.subscribe();
    drop(driver);
    // The task exits once the command channel closes, dropping the sender.
    assert!(rx.changed().await.is_err());
}
