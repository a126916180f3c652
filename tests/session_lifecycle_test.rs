//! End-to-end session scenarios through the facade crate.

use memory_match::core::{Deck, GameSession, SimpleRng, TapOutcome};
use memory_match::types::{CardId, GameAction, Outcome, PairId, Phase, MISMATCH_REVEAL_MS};

fn session(level: u32, seed: u32) -> GameSession {
    GameSession::with_level(Deck::builtin(), SimpleRng::new(seed), level)
}

/// Board card ids grouped by pair, in first-seen order.
fn pairs(s: &GameSession) -> Vec<(PairId, CardId, CardId)> {
    let mut out: Vec<(PairId, CardId, CardId)> = Vec::new();
    for card in s.board() {
        if out.iter().any(|(p, _, _)| *p == card.pair_id) {
            continue;
        }
        let partner = s
            .board()
            .iter()
            .find(|c| c.pair_id == card.pair_id && c.id != card.id)
            .unwrap();
        out.push((card.pair_id, card.id, partner.id));
    }
    out
}

fn clear_board(s: &mut GameSession) {
    for (_, a, b) in pairs(s) {
        s.tap_card(a);
        s.tap_card(b);
    }
}

#[test]
fn level_one_walkthrough() {
    let mut s = session(1, 42);
    assert_eq!(s.phase(), Phase::Home);
    assert!(s.apply_action(GameAction::StartGame));
    assert_eq!(s.board().len(), 4);
    assert_eq!(s.time_remaining(), 300);

    let board = pairs(&s);
    let (p0, a0, b0) = board[0];
    let (_, a1, _) = board[1];

    // Mismatch, visible for the reveal delay.
    assert_eq!(s.tap_card(a0), TapOutcome::Revealed);
    assert_eq!(s.tap_card(a1), TapOutcome::Mismatched);
    assert_eq!(s.incorrect(), 1);
    assert_eq!(s.flipped(), &[a0, a1]);
    s.advance(MISMATCH_REVEAL_MS);
    assert!(s.flipped().is_empty());

    // Match.
    s.tap_card(a0);
    assert_eq!(s.tap_card(b0), TapOutcome::Matched(p0));
    assert_eq!(s.score(), 1);
    assert!(s.flipped().is_empty());
    assert!(!s.ended());

    // Last pair completes the level.
    let (p1, a1, b1) = board[1];
    s.tap_card(a1);
    assert_eq!(s.tap_card(b1), TapOutcome::Matched(p1));
    assert!(s.ended());
    assert_eq!(s.outcome(), Some(Outcome::LevelComplete));
    assert_eq!(s.outcome().unwrap().title(), "Level Complete!");
    assert_eq!(s.score(), 2);
    assert_eq!(s.incorrect(), 1);
}

#[test]
fn progression_through_levels() {
    let mut s = session(1, 3);
    s.start_game();

    let expected = [(1, 300, 4), (2, 270, 8), (3, 240, 12), (4, 210, 16)];
    for (i, (level, time, cards)) in expected.iter().enumerate() {
        assert_eq!(s.level(), *level);
        assert_eq!(s.time_remaining(), *time);
        assert_eq!(s.board().len(), *cards);
        assert_eq!(s.phase(), Phase::Playing);

        clear_board(&mut s);
        assert_eq!(s.outcome(), Some(Outcome::LevelComplete));
        if i + 1 < expected.len() {
            assert!(s.apply_action(GameAction::NextLevel));
        }
    }
}

#[test]
fn late_levels_hold_sixteen_pairs() {
    let mut s = session(9, 1);
    assert_eq!(s.pairs_required(), 16);
    assert_eq!(s.time_remaining(), 120);
    s.start_game();
    clear_board(&mut s);
    assert_eq!(s.score(), 16);

    s.next_level();
    assert_eq!(s.level(), 10);
    assert_eq!(s.board().len(), 32);
    assert_eq!(s.time_remaining(), 120);
}

#[test]
fn running_out_of_time() {
    let mut s = session(2, 8);
    s.start_game();
    let (_, a, b) = pairs(&s)[0];
    s.tap_card(a);
    s.tap_card(b);

    for _ in 0..269 {
        assert!(s.tick());
    }
    assert_eq!(s.time_remaining(), 1);
    assert!(!s.ended());
    s.tick();

    assert_eq!(s.time_remaining(), 0);
    assert_eq!(s.outcome(), Some(Outcome::GameOver));
    assert_eq!(s.outcome().unwrap().title(), "Game Over!");
    assert_eq!(s.score(), 1);

    // Frozen until the popup is closed.
    let other = pairs(&s)[1].1;
    assert_eq!(s.tap_card(other), TapOutcome::Ignored);
    assert!(!s.next_level());
    assert!(s.apply_action(GameAction::ClosePopup));
    assert_eq!(s.phase(), Phase::Home);
    assert_eq!(s.level(), 2);
    assert_eq!(s.time_remaining(), 270);
    assert_eq!(s.score(), 0);
}

#[test]
fn stopping_mid_play() {
    let mut s = session(1, 12);
    s.start_game();
    let (_, a, b) = pairs(&s)[0];
    s.tap_card(a);
    s.tap_card(b);
    assert!(s.apply_action(GameAction::StopGame));
    assert_eq!(s.outcome(), Some(Outcome::GameOver));

    assert!(s.apply_action(GameAction::RestartLevel));
    assert_eq!(s.phase(), Phase::Home);
    assert_eq!(s.level(), 1);
}

#[test]
fn restart_after_completion_replays_level() {
    let mut s = session(3, 5);
    s.start_game();
    clear_board(&mut s);
    let before = s.incarnation();

    assert!(s.restart_level());
    assert_eq!(s.level(), 3);
    assert_eq!(s.phase(), Phase::Home);
    assert!(s.matched().is_empty());
    assert!(s.incarnation() > before);

    assert!(s.start_game());
    assert_eq!(s.board().len(), 12);
}

#[test]
fn snapshots_track_every_transition() {
    let mut s = session(1, 77);
    let mut snap = s.snapshot();
    assert!(!snap.show_popup());

    s.start_game();
    s.snapshot_into(&mut snap);
    assert!(snap.started());
    assert!(snap.board.iter().all(|c| !c.face_up));

    s.stop_game();
    s.snapshot_into(&mut snap);
    assert!(snap.show_popup());
    assert_eq!(snap.outcome, Some(Outcome::GameOver));
    assert_eq!(snap.timers.tick_ms, None);
}
