// src/cli.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::consts::*;
use crate::config::options::{hours, InputPath, NotifyTarget, WatchOptions};
use crate::core::HttpFetcher;
use crate::error::ConfigError;
use crate::file::read_url_list;
use crate::notify::{ConsoleNotifier, Notifier, TelegramNotifier};
use crate::runner::{self, Cycle, Every, Once, Trigger};
use crate::store::SnapshotStore;

#[derive(Parser, Debug)]
#[command(
    name = "statue_watch",
    version,
    about = "Watch product pages and report phase / release / description changes"
)]
pub struct Args {
    /// Directory holding the URL list.
    #[arg(short = 'd', long = "dir", default_value = DEFAULT_INPUT_DIR)]
    pub dir: PathBuf,

    /// URL list file name (one URL per line).
    #[arg(short = 'f', long = "file", default_value = DEFAULT_INPUT_FILE)]
    pub file: PathBuf,

    /// Snapshot file with the last known state of every page.
    #[arg(long, env = "STATUE_WATCH_HISTORY", default_value = DEFAULT_HISTORY_FILE)]
    pub history: PathBuf,

    /// Hours between checks.
    #[arg(long, default_value_t = DEFAULT_INTERVAL_HOURS)]
    pub interval_hours: u64,

    /// Per-page fetch timeout in seconds.
    #[arg(long, default_value_t = FETCH_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Pages fetched in parallel.
    #[arg(long, default_value_t = WORKERS)]
    pub workers: usize,

    /// CSS selector of the description block.
    #[arg(long, default_value = DESCRIPTION_SELECTOR)]
    pub description_selector: String,

    /// Run one check and exit.
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Print messages to stdout instead of sending them.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    #[arg(long, env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat: Option<String>,
}

impl Args {
    pub fn into_options(self) -> Result<WatchOptions, ConfigError> {
        let notify = if self.dry_run {
            NotifyTarget::Console
        } else {
            let token = self
                .telegram_token
                .filter(|t| !t.trim().is_empty())
                .ok_or(ConfigError::MissingCredential("TELEGRAM_BOT_TOKEN"))?;
            let chat_id = self
                .telegram_chat
                .filter(|c| !c.trim().is_empty())
                .ok_or(ConfigError::MissingCredential("TELEGRAM_CHAT_ID"))?;
            NotifyTarget::Telegram { token, chat_id }
        };

        let opts = WatchOptions {
            input: InputPath { dir: self.dir, file: self.file },
            history: self.history,
            interval: hours(self.interval_hours)?,
            fetch_timeout: Duration::from_secs(self.timeout_secs),
            workers: self.workers.max(1),
            description_selector: self.description_selector,
            notify,
            once: self.once,
        };
        opts.validate()?;
        Ok(opts)
    }
}

/// Parse arguments, load state, and watch until killed (or one cycle with `--once`).
pub fn run() -> color_eyre::Result<()> {
    let opts = Args::parse().into_options()?;
    watch(&opts)
}

pub fn watch(opts: &WatchOptions) -> color_eyre::Result<()> {
    let container = opts.selector()?;
    let items = read_url_list(&opts.input.path())?;
    if items.is_empty() {
        logw!("{} lists no URLs", opts.input.path().display());
    }

    // Without a readable baseline every page would look new; refuse to start.
    let mut store = SnapshotStore::load(opts.history_path())?;
    logf!("Loaded {} known items from {}", store.len(), opts.history_path().display());

    let fetcher = HttpFetcher::new()?;
    let (notifier, destination): (Box<dyn Notifier>, String) = match &opts.notify {
        NotifyTarget::Telegram { token, chat_id } => {
            (Box::new(TelegramNotifier::new(token)?), chat_id.clone())
        }
        NotifyTarget::Console => (Box::new(ConsoleNotifier), s!("stdout")),
    };

    let mut cycle = Cycle::new(&fetcher, notifier.as_ref(), &destination, &container, opts.fetch_timeout);
    cycle.workers = opts.workers;

    let mut trigger: Box<dyn Trigger> = if opts.once {
        Box::new(Once)
    } else {
        Box::new(Every(opts.interval))
    };

    logf!("Watching {} items", items.len());
    let summary = runner::watch(&cycle, &items, &mut store, trigger.as_mut());
    if !summary.flushed {
        color_eyre::eyre::bail!("snapshot could not be saved to {}", opts.history_path().display());
    }
    Ok(())
}
