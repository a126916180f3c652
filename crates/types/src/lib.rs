//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! They are plain data with no behaviour beyond parsing and naming, so they
//! can be used in any context (session logic, terminal rendering, drivers).
//!
//! # Level Parameters
//!
//! Difficulty grows linearly with the level and is capped on both axes:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_LEVEL_SECS` | 300 | Time available at level 1 |
//! | `LEVEL_TIME_STEP_SECS` | 30 | Time removed per level |
//! | `MIN_LEVEL_SECS` | 120 | Time floor (reached at level 7) |
//! | `PAIRS_PER_LEVEL` | 2 | Pairs added per level |
//! | `MAX_PAIRS` | 16 | Pair cap (reached at level 8) |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 1000 | Countdown step while playing |
//! | `MISMATCH_REVEAL_MS` | 500 | How long a mismatched pair stays face-up |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{Card, GameAction, Outcome, Phase, MAX_PAIRS};
//!
//! let card = Card::new(7, 3, "★");
//! assert_eq!(card.pair_id, 3);
//!
//! assert_eq!(GameAction::TapCard(7).as_str(), "tapCard");
//! assert!(Phase::Playing.started());
//! assert_eq!(Outcome::LevelComplete.title(), "Level Complete!");
//! assert_eq!(MAX_PAIRS, 16);
//! ```

use serde::{Deserialize, Serialize};

/// Countdown step while a session is playing (one second).
pub const TICK_MS: u32 = 1000;

/// How long both cards of a mismatch stay face-up before flipping back.
pub const MISMATCH_REVEAL_MS: u32 = 500;

/// Seconds available at level 1.
pub const BASE_LEVEL_SECS: u32 = 300;

/// Seconds removed for every level after the first.
pub const LEVEL_TIME_STEP_SECS: u32 = 30;

/// Lower bound on the time available for any level.
pub const MIN_LEVEL_SECS: u32 = 120;

/// Pairs added per level.
pub const PAIRS_PER_LEVEL: u32 = 2;

/// Upper bound on the number of pairs on a board.
pub const MAX_PAIRS: u32 = 16;

/// Upper bound on the number of cards on a board; also the minimum deck size.
pub const MAX_BOARD_CARDS: usize = (MAX_PAIRS * 2) as usize;

/// At most this many unmatched cards are face-up at once.
pub const MAX_FLIPPED: usize = 2;

/// Card identity, unique across the full deck.
pub type CardId = u32;

/// Identifier shared by exactly two cards of the deck.
pub type PairId = u32;

/// An immutable card of the deck.
///
/// Display state (face-up, matched) is never stored here; it is derived from
/// the session's flipped and matched sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub pair_id: PairId,
    /// Opaque symbol or image reference.
    pub symbol: String,
}

impl Card {
    pub fn new(id: CardId, pair_id: PairId, symbol: impl Into<String>) -> Self {
        Self {
            id,
            pair_id,
            symbol: symbol.into(),
        }
    }
}

/// Coarse session lifecycle.
///
/// - **Home**: not started, parameters of the current level on display
/// - **Playing**: timer running, cards accept taps
/// - **Resolved**: session ended, result popup on display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Home,
    Playing,
    Resolved,
}

impl Phase {
    /// `started` flag of the read model.
    pub fn started(&self) -> bool {
        matches!(self, Phase::Playing)
    }

    /// `ended` flag of the read model.
    pub fn ended(&self) -> bool {
        matches!(self, Phase::Resolved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Home => "home",
            Phase::Playing => "playing",
            Phase::Resolved => "resolved",
        }
    }
}

/// How a resolved session ended.
///
/// Derived from the score when the popup is shown, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Every pair of the level was matched.
    LevelComplete,
    /// Time ran out or the player stopped early.
    GameOver,
}

impl Outcome {
    /// Popup title shown for this outcome.
    ///
    /// ```
    /// use memory_match_types::Outcome;
    ///
    /// assert_eq!(Outcome::LevelComplete.title(), "Level Complete!");
    /// assert_eq!(Outcome::GameOver.title(), "Game Over!");
    /// ```
    pub fn title(&self) -> &'static str {
        match self {
            Outcome::LevelComplete => "Level Complete!",
            Outcome::GameOver => "Game Over!",
        }
    }
}

/// Inputs accepted by the session.
///
/// The periodic tick is not an action: it is driven by the session clock
/// (see `GameSession::advance`) or called directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Start playing the current level from the home screen
    StartGame,
    /// Abort the running session
    StopGame,
    /// Flip the card with the given id
    TapCard(CardId),
    /// Advance to the next level after completing this one
    NextLevel,
    /// Return to the home screen at the current level
    RestartLevel,
    /// Dismiss a game-over popup
    ClosePopup,
}

impl GameAction {
    /// camelCase name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::StartGame => "startGame",
            GameAction::StopGame => "stopGame",
            GameAction::TapCard(_) => "tapCard",
            GameAction::NextLevel => "nextLevel",
            GameAction::RestartLevel => "restartLevel",
            GameAction::ClosePopup => "closePopup",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parameter_defaults() {
        assert_eq!(BASE_LEVEL_SECS, 300);
        assert_eq!(LEVEL_TIME_STEP_SECS, 30);
        assert_eq!(MIN_LEVEL_SECS, 120);
        assert_eq!(PAIRS_PER_LEVEL, 2);
        assert_eq!(MAX_PAIRS, 16);
        assert_eq!(MAX_BOARD_CARDS, 32);
    }

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 1000);
        assert_eq!(MISMATCH_REVEAL_MS, 500);
        assert_eq!(MAX_FLIPPED, 2);
    }

    #[test]
    fn card_deserializes_camel_case_pair_id() {
        let card: Card = serde_json::from_str(r#"{"id":4,"pairId":2,"symbol":"♣"}"#).unwrap();
        assert_eq!(card, Card::new(4, 2, "♣"));
    }

    #[test]
    fn phase_flags() {
        assert_eq!((Phase::Home.started(), Phase::Home.ended()), (false, false));
        assert_eq!((Phase::Playing.started(), Phase::Playing.ended()), (true, false));
        assert_eq!((Phase::Resolved.started(), Phase::Resolved.ended()), (false, true));
    }
}
