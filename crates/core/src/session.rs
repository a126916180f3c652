//! Session module - the game session state machine
//!
//! A [`GameSession`] owns the level, counters, board and timers of one player.
//! Every input is an explicit transition method; each applies one atomic
//! change and reports whether anything happened.
//!
//! ```text
//!   Home --start--> Playing --(all matched | time out | stop)--> Resolved
//!    ^                 ^                                            |
//!    |                 +---------------- next level ----------------+
//!    +------------------------ restart / close ---------------------+
//! ```
//!
//! Timers are plain millisecond countdowns stored in the session. Ending or
//! resetting a session disarms them before anything else changes, so a timer
//! armed for one incarnation can never fire into the next.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::deck::Deck;
use crate::rng::{shuffle, RandomSource, SimpleRng};
use crate::rules::{pairs_for_level, time_for_level};
use crate::snapshot::{BoardCard, SessionSnapshot, TimersSnapshot};
use crate::types::{
    Card, CardId, GameAction, Outcome, PairId, Phase, MAX_FLIPPED, MAX_PAIRS, MISMATCH_REVEAL_MS,
    TICK_MS,
};

/// Result of a card tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Not playing, unknown card, already face-up, or two cards showing
    Ignored,
    /// First card of an attempt turned face-up
    Revealed,
    /// Second card completed a pair
    Matched(PairId),
    /// Second card belongs to another pair; both flip back after the reveal delay
    Mismatched,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession<R = SimpleRng> {
    deck: Deck,
    rng: R,
    level: u32,
    phase: Phase,
    score: u32,
    incorrect: u32,
    time_remaining: u32,
    board: Vec<Card>,
    flipped: ArrayVec<CardId, MAX_FLIPPED>,
    /// Resolved pairs, in resolution order.
    matched: Vec<PairId>,
    /// Countdown to the next one-second tick. Armed only while playing.
    tick_timer_ms: Option<u32>,
    /// Countdown to flipping a mismatched pair back. At most one is pending.
    mismatch_timer_ms: Option<u32>,
    /// Monotonic id of the current board deal (increments on every reset).
    incarnation: u32,
}

impl<R: RandomSource> GameSession<R> {
    /// Create a session at level 1 on the home screen.
    pub fn new(deck: Deck, rng: R) -> Self {
        Self::with_level(deck, rng, 1)
    }

    /// Create a session at `level` on the home screen. Level 0 becomes 1.
    pub fn with_level(deck: Deck, rng: R, level: u32) -> Self {
        let mut session = Self {
            deck,
            rng,
            level: level.max(1),
            phase: Phase::Home,
            score: 0,
            incorrect: 0,
            time_remaining: 0,
            board: Vec::new(),
            flipped: ArrayVec::new(),
            matched: Vec::with_capacity(MAX_PAIRS as usize),
            tick_timer_ms: None,
            mismatch_timer_ms: None,
            incarnation: 0,
        };
        session.reset();
        session
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase.started()
    }

    pub fn ended(&self) -> bool {
        self.phase.ended()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn incorrect(&self) -> u32 {
        self.incorrect
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn flipped(&self) -> &[CardId] {
        &self.flipped
    }

    pub fn matched(&self) -> &[PairId] {
        &self.matched
    }

    pub fn incarnation(&self) -> u32 {
        self.incarnation
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Pairs that must be matched to complete the current level.
    pub fn pairs_required(&self) -> u32 {
        pairs_for_level(self.level)
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.board.iter().find(|c| c.id == id)
    }

    pub fn is_matched(&self, pair_id: PairId) -> bool {
        self.matched.contains(&pair_id)
    }

    pub fn is_face_up(&self, card: &Card) -> bool {
        self.flipped.contains(&card.id) || self.is_matched(card.pair_id)
    }

    /// True while a mismatched pair is on display.
    pub fn mismatch_pending(&self) -> bool {
        self.mismatch_timer_ms.is_some()
    }

    /// How the session ended; `None` unless resolved.
    ///
    /// Derived from the score, so stopping with every pair matched reads as a
    /// completed level.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.phase != Phase::Resolved {
            return None;
        }
        if self.score == self.pairs_required() {
            Some(Outcome::LevelComplete)
        } else {
            Some(Outcome::GameOver)
        }
    }

    /// Milliseconds until the next armed timer fires, if any.
    pub fn next_timer_ms(&self) -> Option<u32> {
        match (self.tick_timer_ms, self.mismatch_timer_ms) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::StartGame => self.start_game(),
            GameAction::StopGame => self.stop_game(),
            GameAction::TapCard(id) => self.tap_card(id) != TapOutcome::Ignored,
            GameAction::NextLevel => self.next_level(),
            GameAction::RestartLevel => self.restart_level(),
            GameAction::ClosePopup => self.close_popup(),
        }
    }

    /// Home -> Playing at the current level.
    pub fn start_game(&mut self) -> bool {
        if self.phase != Phase::Home {
            return false;
        }
        self.reset();
        self.play();
        true
    }

    /// Abort a running session. Reads as game over unless every pair was matched.
    pub fn stop_game(&mut self) -> bool {
        self.end_game()
    }

    /// Playing -> Resolved. Idempotent: only the first call has an effect.
    pub fn end_game(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.disarm_timers();
        self.phase = Phase::Resolved;
        debug!(
            level = self.level,
            score = self.score,
            incorrect = self.incorrect,
            time_remaining = self.time_remaining,
            outcome = ?self.outcome(),
            "session ended"
        );
        true
    }

    /// Resolved (level complete) -> Playing at the next level.
    pub fn next_level(&mut self) -> bool {
        if self.outcome() != Some(Outcome::LevelComplete) {
            return false;
        }
        self.level = self.level.saturating_add(1);
        self.reset();
        self.play();
        true
    }

    /// Resolved -> Home at the current level, with a fresh deal.
    pub fn restart_level(&mut self) -> bool {
        if self.phase != Phase::Resolved {
            return false;
        }
        self.reset();
        true
    }

    /// Dismiss a game-over popup; same reset as [`Self::restart_level`].
    pub fn close_popup(&mut self) -> bool {
        if self.outcome() != Some(Outcome::GameOver) {
            return false;
        }
        self.reset();
        true
    }

    /// One second of play: decrement the countdown, ending the session at zero.
    ///
    /// [`Self::advance`] calls this on its own schedule; callers with an
    /// external one-second clock call it directly instead.
    pub fn tick(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.end_game();
        }
        true
    }

    /// Flip a card, resolving the attempt when it is the second one face-up.
    pub fn tap_card(&mut self, card_id: CardId) -> TapOutcome {
        if self.phase != Phase::Playing || self.flipped.is_full() {
            return TapOutcome::Ignored;
        }
        let Some(pair_id) = self.card(card_id).map(|c| c.pair_id) else {
            return TapOutcome::Ignored;
        };
        if self.is_matched(pair_id) || self.flipped.contains(&card_id) {
            return TapOutcome::Ignored;
        }

        self.flipped.push(card_id);
        if !self.flipped.is_full() {
            return TapOutcome::Revealed;
        }

        let first_pair = self.card(self.flipped[0]).map(|c| c.pair_id);
        if first_pair == Some(pair_id) {
            self.score += 1;
            self.matched.push(pair_id);
            self.flipped.clear();
            debug!(pair_id, score = self.score, "pair matched");

            if self.matched.len() as u32 == self.pairs_required() {
                self.end_game();
            }
            TapOutcome::Matched(pair_id)
        } else {
            self.incorrect += 1;
            // Replaces any clear still pending from an earlier attempt.
            self.mismatch_timer_ms = Some(MISMATCH_REVEAL_MS);
            debug!(incorrect = self.incorrect, "pair mismatched");
            TapOutcome::Mismatched
        }
    }

    /// Flip a pending mismatched pair back face-down.
    pub fn clear_mismatch(&mut self) -> bool {
        if self.mismatch_timer_ms.take().is_none() {
            return false;
        }
        self.flipped.clear();
        true
    }

    /// Advance the session clock, firing due timers in chronological order.
    ///
    /// Returns true if any timer fired.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let mut remaining = elapsed_ms;
        let mut fired = false;

        while let Some(due) = self.next_timer_ms() {
            if due > remaining {
                self.consume_timers(remaining);
                break;
            }
            self.consume_timers(due);
            remaining -= due;

            if self.mismatch_timer_ms == Some(0) {
                self.clear_mismatch();
                fired = true;
            }
            if self.tick_timer_ms == Some(0) {
                // Re-arm first: a tick that ends the session disarms it again.
                self.tick_timer_ms = Some(TICK_MS);
                self.tick();
                fired = true;
            }
        }

        fired
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.level = self.level;
        out.phase = self.phase;
        out.score = self.score;
        out.incorrect = self.incorrect;
        out.time_remaining = self.time_remaining;
        out.pairs_required = self.pairs_required();
        out.board.clear();
        out.board.extend(self.board.iter().map(|card| BoardCard {
            id: card.id,
            pair_id: card.pair_id,
            symbol: card.symbol.clone(),
            face_up: self.is_face_up(card),
            matched: self.is_matched(card.pair_id),
        }));
        out.flipped.clone_from(&self.flipped);
        out.matched.clone_from(&self.matched);
        out.outcome = self.outcome();
        out.incarnation = self.incarnation;
        out.timers = TimersSnapshot {
            tick_ms: self.tick_timer_ms,
            mismatch_ms: self.mismatch_timer_ms,
        };
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Fresh deal for the current level, back on the home screen.
    fn reset(&mut self) {
        self.disarm_timers();
        self.phase = Phase::Home;
        self.score = 0;
        self.incorrect = 0;
        self.time_remaining = time_for_level(self.level);
        self.flipped.clear();
        self.matched.clear();
        self.board = shuffle(self.deck.cards_for_level(self.level), &mut self.rng);
        self.incarnation = self.incarnation.wrapping_add(1);
        debug!(
            level = self.level,
            incarnation = self.incarnation,
            cards = self.board.len(),
            "board dealt"
        );
    }

    fn play(&mut self) {
        self.phase = Phase::Playing;
        self.tick_timer_ms = Some(TICK_MS);
        debug!(level = self.level, time = self.time_remaining, "session started");
    }

    fn disarm_timers(&mut self) {
        self.tick_timer_ms = None;
        self.mismatch_timer_ms = None;
    }

    fn consume_timers(&mut self, ms: u32) {
        if let Some(t) = self.tick_timer_ms.as_mut() {
            *t = t.saturating_sub(ms);
        }
        if let Some(t) = self.mismatch_timer_ms.as_mut() {
            *t = t.saturating_sub(ms);
        }
    }

    #[cfg(test)]
    pub(crate) fn set_time_remaining(&mut self, secs: u32) {
        self.time_remaining = secs;
    }
}

impl Default for GameSession<SimpleRng> {
    fn default() -> Self {
        Self::new(Deck::builtin(), SimpleRng::default())
    }
}
