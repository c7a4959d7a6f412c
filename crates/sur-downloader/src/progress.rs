//! Transfer progress reporting.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Receives progress of a streaming transfer.
pub trait ProgressSink: Send + Sync {
    /// Called after every received chunk.
    fn update(&self, label: &str, total: Option<u64>, so_far: u64);

    /// Called once the transfer is complete.
    fn finish(&self, _label: &str) {}
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _label: &str, _total: Option<u64>, _so_far: u64) {}
}

/// Terminal progress bar, one bar per transfer.
#[derive(Debug, Default)]
pub struct BarProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarProgress {
    /// Create an idle progress bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn create(label: &str, total: Option<u64>) -> ProgressBar {
        let bar = total.map_or_else(ProgressBar::new_spinner, ProgressBar::new);
        let template = if total.is_some() {
            ">>> {msg} [{bar:30.cyan/blue}] {percent}% ({bytes}/{total_bytes})"
        } else {
            ">>> {msg} {spinner} {bytes}"
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message(label.to_string());
        bar
    }
}

impl ProgressSink for BarProgress {
    fn update(&self, label: &str, total: Option<u64>, so_far: u64) {
        if let Ok(mut slot) = self.bar.lock() {
            slot.get_or_insert_with(|| Self::create(label, total))
                .set_position(so_far);
        }
    }

    fn finish(&self, _label: &str) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(bar) = slot.take()
        {
            bar.finish_and_clear();
        }
    }
}
