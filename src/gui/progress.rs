// src/gui/progress.rs
use std::sync::{ Arc, Mutex };
use crate::progress::Progress;

/// Progress sink for a background resolve. Writes to shared slots the UI
/// thread reads every frame.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    alerts: Arc<Mutex<Vec<String>>>,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>, alerts: Arc<Mutex<Vec<String>>>) -> Self {
        Self { status, alerts, done: 0, failed: 0, total: 0 }
    }
    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.set_status(format!("Retrieving {} record(s)…", total));
    }
    fn item_done(&mut self, position: usize, id: &str) {
        self.done += 1;
        self.set_status(format!("Retrieved #{} id {} ({}/{})", position, id, self.done + self.failed, self.total));
    }
    fn item_failed(&mut self, _position: usize, _id: &str) {
        self.failed += 1;
    }
    fn alert(&mut self, msg: &str) {
        if let Ok(mut a) = self.alerts.lock() {
            a.push(s!(msg));
        }
    }
    fn finish(&mut self) {
        if self.total == 0 {
            self.set_status(s!("Collection has no records"));
        } else {
            self.set_status(format!("Done ({}/{} retrieved, {} failed)", self.done, self.total, self.failed));
        }
    }
}
