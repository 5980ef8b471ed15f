// src/runner.rs
//
// One fetch cycle: fetch every tracked URL, diff against the snapshot, store
// what changed, tell the human about real changes, flush once at the end.
//
// Fetches may run on a small worker pool; everything that touches the store
// or the notifier stays on the calling thread, in input order.

use std::{
    sync::{atomic::{AtomicUsize, Ordering}, mpsc},
    thread,
    time::Duration,
};

use chrono::Local;
use scraper::Selector;

use crate::{
    config::consts::{JITTER_MS, REQUEST_PAUSE_MS},
    core::Fetcher,
    diff,
    error::FetchError,
    notify::{self, Notifier},
    progress::{LogProgress, Progress},
    record::ProductRecord,
    specs::product,
    store::SnapshotStore,
};

/// Everything a cycle needs besides the store.
pub struct Cycle<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub notifier: &'a dyn Notifier,
    /// Where messages go (chat id for Telegram).
    pub destination: &'a str,
    pub container: &'a Selector,
    pub timeout: Duration,
    pub workers: usize,
    /// Pause after each fetch; a worker adds a little jitter on top.
    pub pause: Duration,
}

impl<'a> Cycle<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        notifier: &'a dyn Notifier,
        destination: &'a str,
        container: &'a Selector,
        timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            notifier,
            destination,
            container,
            timeout,
            workers: 1,
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }
}

/// What happened during one cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub checked: usize,
    pub failed: usize,
    pub changed: usize,
    /// First sightings stored silently.
    pub baselined: usize,
    pub notified: usize,
    pub notify_failed: usize,
    /// The end-of-cycle flush succeeded.
    pub flushed: bool,
}

pub fn run_cycle(
    cycle: &Cycle,
    items: &[String],
    store: &mut SnapshotStore,
    mut progress: Option<&mut dyn Progress>,
) -> CycleSummary {
    logf!("Checking {} items at {}", items.len(), Local::now().format("%d.%m %H:%M:%S"));
    if let Some(p) = progress.as_deref_mut() {
        p.begin(items.len());
    }

    let mut summary = CycleSummary::default();

    if cycle.workers <= 1 {
        for (i, url) in items.iter().enumerate() {
            let result = product::fetch(cycle.fetcher, url, cycle.timeout, cycle.container);
            settle(cycle, store, url, result, &mut summary, progress.as_deref_mut());
            if i + 1 < items.len() {
                thread::sleep(cycle.pause);
            }
        }
    } else {
        let pages = fetch_pages(cycle, items);
        for (url, page) in items.iter().zip(pages) {
            let result = page.map(|markup| {
                product::from_markup(&markup, cycle.container, Local::now().naive_local())
            });
            settle(cycle, store, url, result, &mut summary, progress.as_deref_mut());
        }
    }

    match store.flush() {
        Ok(()) => summary.flushed = true,
        Err(e) => loge!("Snapshot not saved, will retry next cycle: {e}"),
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    logf!(
        "Cycle done: {} checked, {} failed, {} changed, {} notified",
        summary.checked, summary.failed, summary.changed, summary.notified
    );
    summary
}

/// Fold one item's fetch outcome into the store and, if warranted, a message.
fn settle(
    cycle: &Cycle,
    store: &mut SnapshotStore,
    url: &str,
    result: Result<ProductRecord, FetchError>,
    summary: &mut CycleSummary,
    progress: Option<&mut (dyn Progress + '_)>,
) {
    let record = match result {
        Ok(r) => r,
        Err(e) => {
            // Snapshot entry stays as it was.
            logw!("Skipping {url}: {e}");
            summary.failed += 1;
            if let Some(p) = progress { p.item_failed(url); }
            return;
        }
    };
    summary.checked += 1;

    let change = diff::detect(&record, store.get(url));
    if let Some(p) = progress { p.item_done(url, change.changed); }
    if !change.changed {
        return;
    }

    store.put(url, record);
    summary.changed += 1;

    if !change.should_notify() {
        logf!("Baseline stored for {url}");
        summary.baselined += 1;
        return;
    }

    logf!("Change detected for {url} ({} fields)", change.diffs.len());
    let Some(message) = notify::compose(url, &change.diffs) else { return };
    match cycle.notifier.send(cycle.destination, &message) {
        Ok(()) => {
            logf!("Notification sent for {url}");
            summary.notified += 1;
        }
        Err(e) => {
            loge!("Notification for {url} failed: {e}");
            summary.notify_failed += 1;
        }
    }
}

/// Fetch all pages on up to `cycle.workers` threads. Results come back in
/// input order.
fn fetch_pages(cycle: &Cycle, items: &[String]) -> Vec<Result<String, FetchError>> {
    let fetcher = cycle.fetcher;
    let timeout = cycle.timeout;
    let pause = cycle.pause;

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<String, FetchError>)>();
    let workers = cycle.workers.min(items.len()).max(1);

    thread::scope(|scope| {
        for _ in 0..workers {
            let idx = &counter;
            let tx = res_tx.clone();
            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= items.len() {
                        break;
                    }
                    let result = fetcher.fetch(&items[i], timeout);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    if !pause.is_zero() {
                        let jitter = (i as u64) % JITTER_MS;
                        thread::sleep(pause + Duration::from_millis(jitter)); // be polite
                    }
                }
            });
        }
    });
    drop(res_tx); // workers are done; only our clone-free receiver remains

    let mut slots: Vec<Option<Result<String, FetchError>>> = (0..items.len()).map(|_| None).collect();
    for (i, result) in res_rx {
        slots[i] = Some(result);
    }

    items
        .iter()
        .zip(slots)
        .map(|(url, slot)| {
            slot.unwrap_or_else(|| Err(FetchError::Network {
                url: url.clone(),
                reason: s!("fetch worker stopped early"),
            }))
        })
        .collect()
}

/* ---------------- Periodic trigger ---------------- */

/// Decides when the next cycle starts. `false` ends the watch loop.
pub trait Trigger {
    fn wait(&mut self) -> bool;
}

/// Sleep a fixed period between cycles, forever.
pub struct Every(pub Duration);

impl Trigger for Every {
    fn wait(&mut self) -> bool {
        logf!("Next check in {}", fmt_period(self.0));
        thread::sleep(self.0);
        true
    }
}

/// Never fires; the watch loop runs the startup cycle only.
pub struct Once;

impl Trigger for Once {
    fn wait(&mut self) -> bool {
        false
    }
}

/// Run one cycle now, then one per trigger. Returns the last summary.
pub fn watch(
    cycle: &Cycle,
    items: &[String],
    store: &mut SnapshotStore,
    trigger: &mut dyn Trigger,
) -> CycleSummary {
    loop {
        let mut progress = LogProgress::default();
        let summary = run_cycle(cycle, items, store, Some(&mut progress));
        if !trigger.wait() {
            return summary;
        }
    }
}

fn fmt_period(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 3600, (secs % 3600) / 60) {
        (h, 0) => format!("{h}h"),
        (0, m) => format!("{m}m"),
        (h, m) => format!("{h}h{m:02}m"),
    }
}
