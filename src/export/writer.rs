use std::ffi::OsString;
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info, warn};

use crate::config::ExportOptions;
use crate::errors::{ProjectionError, Result};
use crate::export::{CancellationFlag, ExportSummary, ProgressCounter, ProgressSink};
use crate::result::InvestmentResult;
use crate::schedule::ScheduleRow;
use crate::types::Granularity;

pub const YEARLY_HEADER: [&str; 5] = ["Year", "Start Balance", "Contributions", "Interest", "End Balance"];
pub const MONTHLY_HEADER: [&str; 5] = ["Month", "Start Balance", "Contributions", "Interest", "End Balance"];

pub fn header_for(granularity: Granularity) -> &'static [&'static str; 5] {
    match granularity {
        Granularity::Yearly => &YEARLY_HEADER,
        Granularity::Monthly => &MONTHLY_HEADER,
    }
}

/// why a write loop stopped early
enum WriteAbort {
    Cancelled,
    Io(io::Error),
}

impl From<io::Error> for WriteAbort {
    fn from(e: io::Error) -> Self {
        WriteAbort::Io(e)
    }
}

impl From<csv::Error> for WriteAbort {
    fn from(e: csv::Error) -> Self {
        // keep the underlying io error so its kind reaches the caller
        match e.into_kind() {
            csv::ErrorKind::Io(source) => WriteAbort::Io(source),
            other => WriteAbort::Io(io::Error::new(io::ErrorKind::Other, format!("{other:?}"))),
        }
    }
}

/// serializes one schedule of a result as csv
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    granularity: Granularity,
}

impl CsvExporter {
    pub fn new(granularity: Granularity) -> Self {
        Self { granularity }
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// write header and rows to any writer; returns the number of data rows
    ///
    /// There is no destination path here, so write failures surface as
    /// [`ProjectionError::Io`]; only [`CsvExporter::export_to_file`] reports
    /// [`ProjectionError::ExportFailed`].
    pub fn write_schedule<W, P>(
        &self,
        result: &InvestmentResult,
        writer: W,
        cancel: &CancellationFlag,
        progress: &mut P,
    ) -> Result<usize>
    where
        W: Write,
        P: ProgressSink + ?Sized,
    {
        self.write_rows(result, writer, cancel, progress)
            .map_err(|abort| match abort {
                WriteAbort::Cancelled => ProjectionError::Cancelled,
                WriteAbort::Io(e) => ProjectionError::Io(e),
            })
    }

    /// write through a temporary file next to `destination`, then rename it into place
    ///
    /// On any failure or cancellation the temporary file is removed and the
    /// destination keeps whatever it held before.
    pub fn export_to_file<P>(
        &self,
        result: &InvestmentResult,
        destination: &Path,
        cancel: &CancellationFlag,
        progress: &mut P,
    ) -> Result<ExportSummary>
    where
        P: ProgressSink + ?Sized,
    {
        let options = ExportOptions::new(self.granularity, destination);
        let failed = |source: io::Error| ProjectionError::ExportFailed {
            path: destination.to_path_buf(),
            source,
        };

        let file_name = destination.file_name().ok_or_else(|| {
            failed(io::Error::new(
                io::ErrorKind::InvalidInput,
                "destination has no file name",
            ))
        })?;
        let mut prefix = OsString::from(file_name);
        prefix.push(".");

        info!(
            "exporting {} {:?} rows to {}",
            result.row_count(self.granularity),
            self.granularity,
            destination.display()
        );

        let mut staged = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(options.staging_dir())
            .map_err(failed)?;
        debug!("staging export in {}", staged.path().display());

        let rows_written = match self.write_rows(result, staged.as_file_mut(), cancel, progress) {
            Ok(rows) => rows,
            Err(WriteAbort::Cancelled) => {
                warn!("export to {} cancelled", destination.display());
                return Err(ProjectionError::Cancelled);
            }
            Err(WriteAbort::Io(e)) => {
                warn!("export to {} failed: {}", destination.display(), e);
                return Err(failed(e));
            }
        };
        staged.as_file().sync_all().map_err(failed)?;

        if cancel.is_cancelled() {
            warn!("export to {} cancelled before rename", destination.display());
            return Err(ProjectionError::Cancelled);
        }

        staged.persist(destination).map_err(|e| {
            warn!("could not move export into {}: {}", destination.display(), e.error);
            failed(e.error)
        })?;
        progress.report(100);

        info!("exported {} rows to {}", rows_written, destination.display());
        Ok(ExportSummary {
            destination: destination.to_path_buf(),
            granularity: self.granularity,
            rows_written,
        })
    }

    fn write_rows<W, P>(
        &self,
        result: &InvestmentResult,
        writer: W,
        cancel: &CancellationFlag,
        progress: &mut P,
    ) -> std::result::Result<usize, WriteAbort>
    where
        W: Write,
        P: ProgressSink + ?Sized,
    {
        let header = header_for(self.granularity);
        match self.granularity {
            Granularity::Yearly => write_table(header, result.yearly_rows(), writer, cancel, progress),
            Granularity::Monthly => write_table(header, result.monthly_rows(), writer, cancel, progress),
        }
    }
}

fn write_table<R, W, P>(
    header: &[&str; 5],
    rows: &[R],
    writer: W,
    cancel: &CancellationFlag,
    progress: &mut P,
) -> std::result::Result<usize, WriteAbort>
where
    R: ScheduleRow,
    W: Write,
    P: ProgressSink + ?Sized,
{
    let mut counter = ProgressCounter::new(rows.len() as u64 + 1);
    let mut out = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    if cancel.is_cancelled() {
        return Err(WriteAbort::Cancelled);
    }
    out.write_record(header.iter())?;
    progress.report(counter.line_written());

    for row in rows {
        if cancel.is_cancelled() {
            return Err(WriteAbort::Cancelled);
        }
        out.write_record(&[
            row.label(),
            row.start_balance().to_fixed(2),
            row.contributions().to_fixed(2),
            row.interest().to_fixed(2),
            row.end_balance().to_fixed(2),
        ])?;
        progress.report(counter.line_written());
    }

    out.flush()?;
    Ok(rows.len())
}
