//! CSV reading sink.
//!
//! One header row, then one row per accepted reading in the order
//! [`READING_COLUMNS`](crate::READING_COLUMNS) lists.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use csv::Writer;
use parking_lot::Mutex;
use wt_core::Reading;
use wt_sim::{ReadingSink, SinkError};

use crate::blocking::with_locked;
use crate::row::{READING_COLUMNS, reading_record};
use crate::{OutputError, OutputResult};

pub(crate) struct CsvState {
    writer:   Writer<File>,
    rows:     u64,
    finished: bool,
}

impl CsvState {
    fn write_row(&mut self, record: &[String; 7]) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.writer.write_record(record)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }
}

/// Writes every reading it is handed to a CSV file.
///
/// Each append is flushed before it returns, so a crash loses at most the
/// reading in flight.  Async appends do the file I/O on Tokio's blocking
/// pool, so a stalled disk surfaces as a dispatch timeout instead of
/// freezing the clock.
pub struct CsvSink {
    pub(crate) state: Arc<Mutex<CsvState>>,
}

impl CsvSink {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(READING_COLUMNS)?;
        writer.flush()?;
        Ok(Self { state: Arc::new(Mutex::new(CsvState { writer, rows: 0, finished: false })) })
    }

    /// Write one row on the calling thread.  Fails with
    /// [`OutputError::Finished`] after [`finish`](Self::finish).
    pub fn write(&self, reading: &Reading) -> OutputResult<()> {
        self.state.lock().write_row(&reading_record(reading))
    }

    /// Rows written so far, header excluded.
    pub fn rows(&self) -> u64 {
        self.state.lock().rows
    }

    /// Flush and stop accepting rows.
    ///
    /// Calling it again is a no-op.
    pub fn finish(&self) -> OutputResult<()> {
        let mut state = self.state.lock();
        if state.finished {
            return Ok(());
        }
        state.finished = true;
        state.writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ReadingSink for CsvSink {
    async fn append(&self, reading: Reading) -> Result<(), SinkError> {
        let record = reading_record(&reading);
        with_locked(&self.state, move |state| state.write_row(&record)).await?;
        Ok(())
    }
}
