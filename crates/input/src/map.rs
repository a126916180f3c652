//! Key mapping from terminal events to UI commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement on the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Screen-level intent of a key press.
///
/// Which [`crate::types::GameAction`] (if any) a command becomes depends on
/// the screen; see [`crate::InputHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiCommand {
    Move(Direction),
    /// Flip the card under the cursor, start the game, or take the popup's default option.
    Confirm,
    Stop,
    Next,
    Restart,
    Close,
    Quit,
}

/// Map keyboard input to a UI command.
pub fn handle_key_event(key: KeyEvent) -> Option<UiCommand> {
    // Terminals with the kitty protocol also report releases.
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(UiCommand::Quit);
    }

    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(UiCommand::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(UiCommand::Move(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            Some(UiCommand::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(UiCommand::Move(Direction::Down))
        }

        // Actions
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiCommand::Confirm),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(UiCommand::Stop),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(UiCommand::Next),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiCommand::Restart),
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Esc => Some(UiCommand::Close),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
