use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};

use crate::config::ExportOptions;
use crate::errors::{ProjectionError, Result};
use crate::export::{CancellationFlag, CsvExporter, ExportSummary, WatchProgress};
use crate::result::InvestmentResult;

/// run an export on the blocking pool
///
/// Must be called from within a tokio runtime. The result is shared, so the
/// caller may keep reading it while the export runs.
pub fn spawn_export(result: impl Into<Arc<InvestmentResult>>, options: ExportOptions) -> ExportHandle {
    let result = result.into();
    let cancel = CancellationFlag::new();
    let (tx, rx) = watch::channel(0u8);

    debug!(
        "spawning {:?} export to {}",
        options.granularity,
        options.destination.display()
    );
    let flag = cancel.clone();
    let task = tokio::task::spawn_blocking(move || {
        let mut sink = WatchProgress(tx);
        CsvExporter::new(options.granularity).export_to_file(
            &result,
            &options.destination,
            &flag,
            &mut sink,
        )
    });

    ExportHandle {
        cancel,
        progress: rx,
        task,
    }
}

/// handle to a running export
#[derive(Debug)]
pub struct ExportHandle {
    cancel: CancellationFlag,
    progress: watch::Receiver<u8>,
    task: JoinHandle<Result<ExportSummary>>,
}

impl ExportHandle {
    /// request cancellation; the writer stops before its next line
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation(&self) -> CancellationFlag {
        self.cancel.clone()
    }

    /// progress receiver, 0..=100
    pub fn progress(&self) -> watch::Receiver<u8> {
        self.progress.clone()
    }

    pub fn current_progress(&self) -> u8 {
        *self.progress.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn wait(self) -> Result<ExportSummary> {
        joined(self.task.await)
    }

    /// wait up to `limit`; past it, cancel and wait for the writer to clean up
    pub async fn wait_timeout(mut self, limit: Duration) -> Result<ExportSummary> {
        match tokio::time::timeout(limit, &mut self.task).await {
            Ok(outcome) => joined(outcome),
            Err(_) => {
                warn!("export still running after {:?}, cancelling", limit);
                self.cancel.cancel();
                joined(self.task.await)
            }
        }
    }
}

fn joined(outcome: std::result::Result<Result<ExportSummary>, JoinError>) -> Result<ExportSummary> {
    outcome.unwrap_or_else(|e| {
        Err(ProjectionError::TaskFailed {
            message: e.to_string(),
        })
    })
}
