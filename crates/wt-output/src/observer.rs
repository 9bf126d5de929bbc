//! `TickCsvObserver` — bridges `ClockObserver` to a tick summary CSV.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use wt_sim::{ClockObserver, RunSummary, TickReport};

use crate::row::{TICK_COLUMNS, tick_record};
use crate::{OutputError, OutputResult};

/// A [`ClockObserver`] that writes one `tick,dispatched,failed` row per tick.
///
/// Errors are stored internally because observer methods have no return
/// value.  After the clock returns, check with
/// [`take_error`][Self::take_error].
pub struct TickCsvObserver {
    writer:     Writer<File>,
    last_error: Option<OutputError>,
}

impl TickCsvObserver {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(TICK_COLUMNS)?;
        Ok(Self { writer, last_error: None })
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl ClockObserver for TickCsvObserver {
    fn on_tick_end(&mut self, report: &TickReport) {
        let result = self.writer.write_record(&tick_record(report)).map_err(OutputError::from);
        self.store_err(result);
    }

    fn on_stop(&mut self, _summary: &RunSummary) {
        let result = self.writer.flush().map_err(OutputError::from);
        self.store_err(result);
    }
}
