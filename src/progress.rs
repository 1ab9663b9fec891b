/// Lightweight progress reporting used by long-running operations (record resolution).
/// Frontends (GUI/CLI) implement this to surface status and alerts to users.
pub trait Progress {
    /// Called at the start with the number of record positions.
    fn begin(&mut self, _total: usize) {}

    /// One position settled with a fragment (found or placeholder).
    fn item_done(&mut self, _position: usize, _id: &str) {}

    /// One position failed to retrieve and will be omitted.
    fn item_failed(&mut self, _position: usize, _id: &str) {}

    /// User-facing alert (the browser's `alert()`).
    fn alert(&mut self, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// Collects alerts in memory; handy for headless callers and tests.
#[derive(Debug, Default)]
pub struct AlertLog {
    pub alerts: Vec<String>,
    pub done: Vec<usize>,
    pub failed: Vec<usize>,
}

impl Progress for AlertLog {
    fn item_done(&mut self, position: usize, _id: &str) {
        self.done.push(position);
    }
    fn item_failed(&mut self, position: usize, _id: &str) {
        self.failed.push(position);
    }
    fn alert(&mut self, msg: &str) {
        self.alerts.push(s!(msg));
    }
}
