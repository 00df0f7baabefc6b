// src/progress.rs
/// Lightweight progress reporting used by the crawl.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of sessions selected.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One session crawled; `rows` intervention rows written for it.
    fn item_done(&mut self, _session: u32, _rows: usize) {}

    /// One session abandoned.
    fn item_failed(&mut self, _session: u32, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}
