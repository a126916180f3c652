//! Terminal input module.
//!
//! Maps `crossterm` key events into [`map::UiCommand`]s, then into
//! [`crate::types::GameAction`]s for the current screen. The cursor lives
//! here; the session never sees it.

pub mod handler;
pub mod map;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit, Direction, UiCommand};
