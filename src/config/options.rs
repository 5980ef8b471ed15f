// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use scraper::Selector;

use super::consts::*;
use crate::error::ConfigError;

/// Where the URL list lives: `<dir>/<file>`, both overridable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputPath {
    pub dir: PathBuf,
    pub file: PathBuf,
}

impl Default for InputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_INPUT_DIR),
            file: PathBuf::from(DEFAULT_INPUT_FILE),
        }
    }
}

impl InputPath {
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

/// Where change messages go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotifyTarget {
    /// Telegram bot token + chat id
    Telegram { token: String, chat_id: String },
    /// Print to stdout
    Console,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WatchOptions {
    pub input: InputPath,
    pub history: PathBuf,
    pub interval: Duration,
    pub fetch_timeout: Duration,
    pub workers: usize,
    pub description_selector: String,
    pub notify: NotifyTarget,
    /// Run a single cycle and exit
    pub once: bool,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            input: InputPath::default(),
            history: PathBuf::from(DEFAULT_HISTORY_FILE),
            interval: Duration::from_secs(DEFAULT_INTERVAL_HOURS * SECS_PER_HOUR),
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            workers: WORKERS,
            description_selector: s!(DESCRIPTION_SELECTOR),
            notify: NotifyTarget::Console,
            once: false,
        }
    }
}

impl WatchOptions {
    pub fn history_path(&self) -> &Path {
        &self.history
    }

    /// Parse the description marker once; reused by every extraction.
    pub fn selector(&self) -> Result<Selector, ConfigError> {
        parse_selector(&self.description_selector)
    }

    /// Reject settings that would make the watcher spin or never match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval < Duration::from_secs(SECS_PER_HOUR) {
            return Err(ConfigError::InvalidInterval);
        }
        self.selector()?;
        Ok(())
    }
}

const SECS_PER_HOUR: u64 = 3600;

/// `n` hours, or `InvalidInterval` when that does not fit a `Duration`.
pub fn hours(n: u64) -> Result<Duration, ConfigError> {
    n.checked_mul(SECS_PER_HOUR)
        .map(Duration::from_secs)
        .ok_or(ConfigError::InvalidInterval)
}

pub fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: s!(selector),
        reason: e.to_string(),
    })
}
