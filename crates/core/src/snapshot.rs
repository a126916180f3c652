use arrayvec::ArrayVec;

use crate::types::{CardId, Outcome, PairId, Phase, MAX_FLIPPED};

/// A dealt card together with its derived display state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardCard {
    pub id: CardId,
    pub pair_id: PairId,
    pub symbol: String,
    /// `flipped.contains(id) || matched.contains(pair_id)`
    pub face_up: bool,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimersSnapshot {
    /// Milliseconds until the next countdown step, if the countdown is armed.
    pub tick_ms: Option<u32>,
    /// Milliseconds until a mismatched pair flips back, if one is pending.
    pub mismatch_ms: Option<u32>,
}

/// Read model of a session, sufficient to render every screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SessionSnapshot {
    pub level: u32,
    pub phase: Phase,
    pub score: u32,
    pub incorrect: u32,
    pub time_remaining: u32,
    pub pairs_required: u32,
    pub board: Vec<BoardCard>,
    pub flipped: ArrayVec<CardId, MAX_FLIPPED>,
    pub matched: Vec<PairId>,
    pub outcome: Option<Outcome>,
    pub incarnation: u32,
    pub timers: TimersSnapshot,
}

impl SessionSnapshot {
    /// Reset to the default, keeping allocations.
    pub fn clear(&mut self) {
        self.level = 0;
        self.phase = Phase::Home;
        self.score = 0;
        self.incorrect = 0;
        self.time_remaining = 0;
        self.pairs_required = 0;
        self.board.clear();
        self.flipped.clear();
        self.matched.clear();
        self.outcome = None;
        self.incarnation = 0;
        self.timers = TimersSnapshot::default();
    }

    pub fn started(&self) -> bool {
        self.phase.started()
    }

    pub fn ended(&self) -> bool {
        self.phase.ended()
    }

    /// The result popup is shown iff the session has ended.
    pub fn show_popup(&self) -> bool {
        self.phase.ended()
    }

    pub fn card(&self, id: CardId) -> Option<&BoardCard> {
        self.board.iter().find(|c| c.id == id)
    }
}
