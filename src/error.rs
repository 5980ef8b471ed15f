// src/error.rs
//
// Error taxonomy. Each boundary gets its own enum so the cycle can decide
// per kind whether to skip, retry later, or abort.

use std::io;
use std::path::PathBuf;

/// A page could not be fetched. The item is skipped for this cycle.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not read body of {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Snapshot persistence failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read snapshot {}: {source}", .path.display())]
    Read { path: PathBuf, #[source] source: io::Error },
    #[error("snapshot {} is not valid: {source}", .path.display())]
    Parse { path: PathBuf, #[source] source: serde_json::Error },
    #[error("could not write snapshot {}: {source}", .path.display())]
    Write { path: PathBuf, #[source] source: io::Error },
    #[error("could not encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A notification could not be delivered. Logged, never retried.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notifier request failed: {0}")]
    Request(String),
    #[error("notifier answered HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Startup configuration is unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set (use --dry-run to print messages instead)")]
    MissingCredential(&'static str),
    #[error("invalid description selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("poll interval must be at least one hour and fit in seconds")]
    InvalidInterval,
    #[error("could not read input list {}: {source}", .path.display())]
    InputList { path: PathBuf, #[source] source: io::Error },
    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
}
