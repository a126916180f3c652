//! Startup configuration read from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `MEMORY_MATCH_DECK` | built-in | JSON deck file |
//! | `MEMORY_MATCH_LEVEL` | 1 | Starting level |
//! | `MEMORY_MATCH_SEED` | OS randomness | Seed for reproducible shuffles |
//! | `MEMORY_MATCH_LOG_PATH` | off | Log file (the terminal belongs to the UI) |
//! | `MEMORY_MATCH_LOG` | `info` | `tracing` filter directive |

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::{Deck, DeckError, OsRandom, RandomSource, SimpleRng};

pub const ENV_DECK: &str = "MEMORY_MATCH_DECK";
pub const ENV_LEVEL: &str = "MEMORY_MATCH_LEVEL";
pub const ENV_SEED: &str = "MEMORY_MATCH_SEED";
pub const ENV_LOG_PATH: &str = "MEMORY_MATCH_LOG_PATH";
pub const ENV_LOG: &str = "MEMORY_MATCH_LOG";

const DEFAULT_LOG_FILTER: &str = "info";

/// A random source the binary can hand to the session driver.
pub type BoxedRandom = Box<dyn RandomSource + Send>;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub deck_path: Option<PathBuf>,
    pub level: u32,
    pub seed: Option<u32>,
    pub log_path: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deck_path: None,
            level: 1,
            seed: None,
            log_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup. Unparseable values fall back
    /// to their defaults; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let level = get(ENV_LEVEL)
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);

        Self {
            deck_path: get(ENV_DECK).map(PathBuf::from),
            level,
            seed: get(ENV_SEED).and_then(|s| s.parse().ok()),
            log_path: get(ENV_LOG_PATH).map(PathBuf::from),
            log_filter: get(ENV_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// The configured deck file, or the built-in deck.
    pub fn load_deck(&self) -> Result<Deck, DeckError> {
        match &self.deck_path {
            Some(path) => Deck::load(path),
            None => Ok(Deck::builtin()),
        }
    }

    /// Seeded LCG when a seed is configured, OS-seeded generator otherwise.
    pub fn random_source(&self) -> BoxedRandom {
        match self.seed {
            Some(seed) => Box::new(SimpleRng::new(seed)),
            None => Box::new(OsRandom::new()),
        }
    }

    /// Install the global `tracing` subscriber.
    ///
    /// Without a log path nothing is installed and events are discarded.
    /// Returns whether a subscriber was installed.
    pub fn init_logging(&self) -> Result<bool> {
        let Some(path) = &self.log_path else {
            return Ok(false);
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        let filter = EnvFilter::try_new(&self.log_filter)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(Mutex::new(file)),
            )
            .with(filter)
            .try_init()
            .context("failed to install tracing subscriber")?;

        Ok(true)
    }
}
