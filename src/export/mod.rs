pub mod task;
pub mod writer;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::types::Granularity;

pub use task::{spawn_export, ExportHandle};
pub use writer::{header_for, CsvExporter, MONTHLY_HEADER, YEARLY_HEADER};

/// set-once flag shared between an export and whoever may cancel it
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// receives export progress in percent
pub trait ProgressSink {
    fn report(&mut self, percent: u8);
}

impl<F: FnMut(u8)> ProgressSink for F {
    fn report(&mut self, percent: u8) {
        self(percent)
    }
}

/// publishes progress on a watch channel; last write wins
#[derive(Debug)]
pub struct WatchProgress(pub watch::Sender<u8>);

impl ProgressSink for WatchProgress {
    fn report(&mut self, percent: u8) {
        self.0.send_replace(percent);
    }
}

/// discards progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: u8) {}
}

/// line-based progress: `min(100, lines_written * 100 / expected_lines)`
#[derive(Debug, Clone)]
pub struct ProgressCounter {
    expected_lines: u64,
    lines_written: u64,
}

impl ProgressCounter {
    pub fn new(expected_lines: u64) -> Self {
        Self {
            expected_lines: expected_lines.max(1),
            lines_written: 0,
        }
    }

    /// count one emitted line and return the new percentage
    pub fn line_written(&mut self) -> u8 {
        self.lines_written += 1;
        self.percent()
    }

    pub fn percent(&self) -> u8 {
        (self.lines_written * 100 / self.expected_lines).min(100) as u8
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

/// outcome of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub destination: PathBuf,
    pub granularity: Granularity,
    /// data rows, header excluded
    pub rows_written: usize,
}
