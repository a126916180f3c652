//! Session engine - drives a [`GameSession`](memory_match_core::GameSession) in real time.
//!
//! The core session is synchronous and clock-agnostic. This crate puts it
//! behind a single owning tokio task so that:
//!
//! - every transition (commands and timer expiries) is applied one at a time,
//!   in arrival order
//! - the one-second countdown and the mismatch reveal run on the real clock
//! - presentation layers observe the read model through a `watch` channel
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> Result<(), memory_match_engine::DriverError> {
//! use memory_match_core::{Deck, GameSession, OsRandom};
//! use memory_match_engine::SessionDriver;
//!
//! let driver = SessionDriver::spawn(GameSession::new(Deck::builtin(), OsRandom::new()));
//! driver.start_game().await?;
//! let snap = driver.snapshot();
//! println!("level {} with {} cards", snap.level, snap.board.len());
//! driver.shutdown().await
//! # }
//! ```

pub mod driver;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use driver::{DriverConfig, DriverError, SessionDriver, SessionHandle};
