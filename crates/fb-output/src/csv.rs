//! CSV trace backend.
//!
//! Header: `frame,behavior_id,weight,accumulated_time_ms,enabled`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, TraceRow};
use crate::writer::TraceWriter;

const HEADER: [&str; 5] = ["frame", "behavior_id", "weight", "accumulated_time_ms", "enabled"];

/// Writes trace rows to any `io::Write` as CSV.
pub struct CsvTraceWriter<W: Write = File> {
    out:      Writer<W>,
    rows:     u64,
    finished: bool,
}

impl CsvTraceWriter<File> {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvTraceWriter<W> {
    /// Wrap `inner` and write the header row.
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        let mut out = Writer::from_writer(inner);
        out.write_record(HEADER)?;
        Ok(Self { out, rows: 0, finished: false })
    }

    /// Data rows written so far (header excluded).
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> OutputResult<W> {
        self.out.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write> TraceWriter for CsvTraceWriter<W> {
    fn write_rows(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        for row in rows {
            self.out.write_record(&[
                row.frame.to_string(),
                row.behavior_id.to_string(),
                row.weight.to_string(),
                row.accumulated_time_ms.to_string(),
                (row.enabled as u8).to_string(),
            ])?;
        }
        self.rows += rows.len() as u64;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
