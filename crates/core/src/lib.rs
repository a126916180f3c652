//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules engine and the session state machine.
//! It has **zero dependencies** on UI, async runtimes, or terminal I/O, making it:
//!
//! - **Deterministic**: a seeded [`SimpleRng`] reproduces every shuffle
//! - **Testable**: every transition is an explicit, synchronous method call
//! - **Portable**: runs behind a terminal, a tokio driver, or a test harness
//!
//! # Module Structure
//!
//! - [`rules`]: level parameters (time, pairs, dealt cards) and time formatting
//! - [`rng`]: injectable random sources and the Fisher-Yates shuffle
//! - [`deck`]: validated card deck, built-in symbols and JSON loading
//! - [`session`]: the game session state machine
//! - [`snapshot`]: read model handed to presentation layers
//!
//! # Game Rules
//!
//! - **Levels**: level `n` deals `min(16, 2n)` pairs and allows
//!   `max(120, 300 - 30(n-1))` seconds
//! - **Dealing**: the first cards of the deck are dealt, then shuffled
//! - **Flipping**: at most two unmatched cards are face-up at once
//! - **Matching**: a match scores a point and stays face-up; a mismatch counts
//!   as incorrect and flips back after 500ms
//! - **Ending**: the session ends when every pair is matched, when the
//!   countdown reaches zero, or when the player stops
//!
//! # Example
//!
//! ```
//! use memory_match_core::{Deck, GameSession, SimpleRng};
//! use memory_match_types::{GameAction, Phase};
//!
//! let mut game = GameSession::new(Deck::builtin(), SimpleRng::new(12345));
//! assert!(game.apply_action(GameAction::StartGame));
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(game.board().len(), 4);
//! assert_eq!(game.time_remaining(), 300);
//!
//! // One second of wall-clock time elapses.
//! game.advance(1000);
//! assert_eq!(game.time_remaining(), 299);
//! ```
//!
//! # Timing
//!
//! The session owns two millisecond countdowns:
//! - **Tick**: 1000ms, decrements the remaining time while playing
//! - **Mismatch reveal**: 500ms, flips a mismatched pair back
//!
//! Call [`GameSession::advance`](session::GameSession::advance) with elapsed
//! time, or call [`GameSession::tick`](session::GameSession::tick) directly
//! from an external one-second clock.

pub mod deck;
pub mod rng;
pub mod rules;
pub mod session;
pub mod snapshot;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use deck::{Deck, DeckError};
pub use rng::{shuffle, OsRandom, RandomSource, SimpleRng};
pub use rules::{
    board_columns, cards_for_level, format_time, pairs_for_level, time_for_level, LevelInfo,
};
pub use session::{GameSession, TapOutcome};
pub use snapshot::{BoardCard, SessionSnapshot, TimersSnapshot};
