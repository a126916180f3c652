//! Rules engine - pure level-to-parameter mapping
//!
//! Difficulty curve (see the constants in `memory_match_types`):
//!
//! | Level | Time | Pairs | Cards |
//! |-------|------|-------|-------|
//! | 1 | 5:00 | 2 | 4 |
//! | 2 | 4:30 | 4 | 8 |
//! | 3 | 4:00 | 6 | 12 |
//! | 4 | 3:30 | 8 | 16 |
//! | 5 | 3:00 | 10 | 20 |
//! | 6 | 2:30 | 12 | 24 |
//! | 7 | 2:00 | 14 | 28 |
//! | 8+ | 2:00 | 16 | 32 |

use crate::deck::DeckError;
use crate::types::{
    Card, BASE_LEVEL_SECS, LEVEL_TIME_STEP_SECS, MAX_PAIRS, MIN_LEVEL_SECS, PAIRS_PER_LEVEL,
};

/// Seconds available for a level: `max(120, 300 - (level - 1) * 30)`.
pub fn time_for_level(level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(LEVEL_TIME_STEP_SECS);
    BASE_LEVEL_SECS
        .saturating_sub(reduction)
        .max(MIN_LEVEL_SECS)
}

/// Pairs dealt for a level: `min(16, 2 * level)`.
pub fn pairs_for_level(level: u32) -> u32 {
    level.saturating_mul(PAIRS_PER_LEVEL).min(MAX_PAIRS)
}

/// Number of cards dealt for a level.
pub fn cards_needed(level: u32) -> usize {
    pairs_for_level(level) as usize * 2
}

/// The deterministic prefix of `deck` dealt for `level`, in deck order.
///
/// An undersized deck is a setup fault and is reported rather than truncated.
pub fn cards_for_level(deck: &[Card], level: u32) -> Result<&[Card], DeckError> {
    let required = cards_needed(level);
    deck.get(..required).ok_or(DeckError::TooSmall {
        required,
        actual: deck.len(),
    })
}

/// Format seconds as `m:ss` (minutes are unbounded, no hours component).
///
/// ```
/// use memory_match_core::format_time;
///
/// assert_eq!(format_time(125), "2:05");
/// assert_eq!(format_time(0), "0:00");
/// ```
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Grid columns for a board of `cards`: four wide until four rows are
/// full, then wider rows so the grid never exceeds four rows.
pub fn board_columns(cards: usize) -> usize {
    cards.div_ceil(4).max(4)
}

/// Everything a screen needs to describe a level before it is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelInfo {
    pub level: u32,
    pub time_secs: u32,
    pub pairs: u32,
    pub cards: u32,
}

impl LevelInfo {
    pub fn for_level(level: u32) -> Self {
        let pairs = pairs_for_level(level);
        Self {
            level,
            time_secs: time_for_level(level),
            pairs,
            cards: pairs * 2,
        }
    }
}
