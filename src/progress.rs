// src/progress.rs
/// Lightweight progress reporting for a fetch cycle.
/// The CLI logs through `LogProgress`; tests pass `NullProgress`.
pub trait Progress {
    /// Called at the start with the number of tracked items.
    fn begin(&mut self, _total: usize) {}

    /// One item was fetched and compared.
    fn item_done(&mut self, _url: &str, _changed: bool) {}

    /// One item could not be fetched this cycle.
    fn item_failed(&mut self, _url: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress lines at debug level, summary at info.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        *self = Self { total, ..Self::default() };
    }

    fn item_done(&mut self, url: &str, changed: bool) {
        self.done += 1;
        logd!("[{}/{}] {url}{}", self.done + self.failed, self.total, if changed { " (changed)" } else { "" });
    }

    fn item_failed(&mut self, url: &str) {
        self.failed += 1;
        logd!("[{}/{}] {url} failed", self.done + self.failed, self.total);
    }

    fn finish(&mut self) {
        logf!("Checked {} of {} items ({} failed)", self.done, self.total, self.failed);
    }
}
