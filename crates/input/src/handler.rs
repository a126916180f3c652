//! Screen-aware input handler.
//!
//! Owns the board cursor and turns a [`UiCommand`] into the [`GameAction`]
//! that makes sense on the current screen. The session stays the authority:
//! an action that is invalid in the current phase is still a harmless no-op
//! there, this layer only avoids sending obviously pointless ones.

use crate::core::{board_columns, SessionSnapshot};
use crate::map::{Direction, UiCommand};
use crate::types::{GameAction, Outcome, Phase};

/// Cursor position on the card grid, reset on every new deal.
#[derive(Debug, Clone, Default)]
pub struct InputHandler {
    cursor: usize,
    incarnation: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Board index under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Translate a command against the latest snapshot.
    pub fn handle(&mut self, cmd: UiCommand, snap: &SessionSnapshot) -> Option<GameAction> {
        self.sync(snap);

        match snap.phase {
            Phase::Home => match cmd {
                UiCommand::Confirm => Some(GameAction::StartGame),
                _ => None,
            },
            Phase::Playing => match cmd {
                UiCommand::Move(dir) => {
                    self.move_cursor(dir, snap.board.len());
                    None
                }
                UiCommand::Confirm => snap
                    .board
                    .get(self.cursor)
                    .map(|card| GameAction::TapCard(card.id)),
                UiCommand::Stop => Some(GameAction::StopGame),
                _ => None,
            },
            Phase::Resolved => match (cmd, snap.outcome) {
                (UiCommand::Confirm | UiCommand::Next, Some(Outcome::LevelComplete)) => {
                    Some(GameAction::NextLevel)
                }
                (UiCommand::Restart, Some(Outcome::LevelComplete)) => {
                    Some(GameAction::RestartLevel)
                }
                (UiCommand::Confirm | UiCommand::Close, Some(Outcome::GameOver)) => {
                    Some(GameAction::ClosePopup)
                }
                _ => None,
            },
        }
    }

    /// Clamp the cursor to the board, homing it when a new board is dealt.
    pub fn sync(&mut self, snap: &SessionSnapshot) {
        if snap.incarnation != self.incarnation {
            self.incarnation = snap.incarnation;
            self.cursor = 0;
        }
        if self.cursor >= snap.board.len() {
            self.cursor = snap.board.len().saturating_sub(1);
        }
    }

    fn move_cursor(&mut self, dir: Direction, len: usize) {
        if len == 0 {
            return;
        }
        let cols = board_columns(len);
        let col = self.cursor % cols;
        self.cursor = match dir {
            Direction::Left if col > 0 => self.cursor - 1,
            Direction::Right if col + 1 < cols && self.cursor + 1 < len => self.cursor + 1,
            Direction::Up if self.cursor >= cols => self.cursor - cols,
            Direction::Down if self.cursor + cols < len => self.cursor + cols,
            _ => self.cursor,
        };
    }
}
