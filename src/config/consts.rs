// src/config/consts.rs

// Input list
pub const DEFAULT_INPUT_DIR: &str = ".";
pub const DEFAULT_INPUT_FILE: &str = "statues.txt";

// Snapshot
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

// Net
pub const FETCH_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = concat!("statue_watch/", env!("CARGO_PKG_VERSION"));
pub const TELEGRAM_API: &str = "https://api.telegram.org";

// Schedule
pub const DEFAULT_INTERVAL_HOURS: u64 = 6;

// Concurrency
pub const WORKERS: usize = 1;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms

// Page markers
pub const PHASE_LABEL: &str = "Product Phase:";
pub const RELEASED_TIME_LABEL: &str = "Est Released Time:";
pub const DESCRIPTION_SELECTOR: &str = "div#tab-description";

// Message rendering
pub const UNKNOWN: &str = "unknown";
pub const DUPLICATE_SEP: &str = "; ";
