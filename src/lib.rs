//! Memory Match (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benchmarks share a single import path. The
//! implementation lives in dedicated crates under `crates/`.

pub mod config;

pub use memory_match_core as core;
pub use memory_match_engine as engine;
pub use memory_match_input as input;
pub use memory_match_term as term;
pub use memory_match_types as types;

pub use config::AppConfig;
