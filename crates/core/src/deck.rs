//! Deck module - the ordered card assets a game deals from
//!
//! A [`Deck`] can only be built through validation, so a session holding one
//! can deal any level without further checks. Problems with the asset list
//! surface at startup instead of mid-game.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::rules::{cards_needed, pairs_for_level};
use crate::types::{Card, CardId, PairId, MAX_BOARD_CARDS, MAX_PAIRS, PAIRS_PER_LEVEL};

/// Symbols of the built-in deck, one per pair. All are single-width glyphs.
const BUILTIN_SYMBOLS: [&str; MAX_PAIRS as usize] = [
    "♠", "♥", "♦", "♣", "★", "☀", "☂", "☃", "♪", "☯", "♞", "⌘", "☾", "✿", "♜", "Ω",
];

/// Deck setup faults.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck has {actual} cards, at least {required} are required")]
    TooSmall { required: usize, actual: usize },

    #[error("card id {0} appears more than once")]
    DuplicateCardId(CardId),

    #[error("pair id {pair_id} is used by {count} cards, expected exactly 2")]
    UnpairedCard { pair_id: PairId, count: usize },

    #[error("level {level} would deal pair id {pair_id} without its partner")]
    IncompleteLevel { level: u32, pair_id: PairId },

    #[error("invalid deck JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read deck file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validated, immutable card deck. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Arc<[Card]>,
}

impl Deck {
    /// Validate an ordered card list.
    ///
    /// Requirements: at least 32 cards, unique card ids, every pair id used by
    /// exactly two cards, and every level's dealt prefix made of whole pairs.
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.len() < MAX_BOARD_CARDS {
            return Err(DeckError::TooSmall {
                required: MAX_BOARD_CARDS,
                actual: cards.len(),
            });
        }

        let mut ids = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !ids.insert(card.id) {
                return Err(DeckError::DuplicateCardId(card.id));
            }
        }

        check_whole_pairs(&cards).map_err(|(pair_id, count)| DeckError::UnpairedCard {
            pair_id,
            count,
        })?;

        // Levels past the cap deal the same prefix as the capping level.
        let capping_level = MAX_PAIRS.div_ceil(PAIRS_PER_LEVEL);
        for level in 1..=capping_level {
            let prefix = &cards[..cards_needed(level)];
            check_whole_pairs(prefix)
                .map_err(|(pair_id, _)| DeckError::IncompleteLevel { level, pair_id })?;
        }

        Ok(Self {
            cards: cards.into(),
        })
    }

    /// Sixteen pairs of single-width symbols, partners adjacent.
    pub fn builtin() -> Self {
        let cards = BUILTIN_SYMBOLS
            .iter()
            .enumerate()
            .flat_map(|(i, symbol)| {
                let pair_id = i as PairId + 1;
                let first = pair_id * 2 - 1;
                [
                    Card::new(first, pair_id, *symbol),
                    Card::new(first + 1, pair_id, *symbol),
                ]
            })
            .collect::<Vec<_>>();

        Self {
            cards: cards.into(),
        }
    }

    /// Parse a JSON array of `{"id", "pairId", "symbol"}` objects.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::new(cards)
    }

    /// Read and validate a JSON deck file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards dealt for `level`, in deck order.
    pub fn cards_for_level(&self, level: u32) -> &[Card] {
        // Validation guarantees at least MAX_BOARD_CARDS cards.
        let n = (pairs_for_level(level) as usize * 2).min(self.cards.len());
        &self.cards[..n]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Ok if every pair id in `cards` occurs exactly twice, else the first offender.
fn check_whole_pairs(cards: &[Card]) -> Result<(), (PairId, usize)> {
    let mut counts: HashMap<PairId, usize> = HashMap::new();
    for card in cards {
        *counts.entry(card.pair_id).or_default() += 1;
    }
    // Report in deck order so errors are stable.
    for card in cards {
        let count = counts[&card.pair_id];
        if count != 2 {
            return Err((card.pair_id, count));
        }
    }
    Ok(())
}
