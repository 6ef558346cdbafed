//! `TraceObserver<W>` — bridges `DriverObserver` to a `TraceWriter`.

use fb_behavior::BehaviorRef;
use fb_core::FrameClock;
use fb_driver::DriverObserver;
use tracing::warn;

use crate::row::TraceRow;
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`DriverObserver`] that records one [`TraceRow`] per behavior update.
///
/// Rows are buffered for the duration of a frame and written in one batch at
/// frame end.  Errors from the writer are stored internally because observer
/// methods have no return value; check with
/// [`take_error`][Self::take_error] after the run.
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    pending:    Vec<TraceRow>,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, pending: Vec::new(), last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer (e.g. to inspect output after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!(error = %e, "trace write failed");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> DriverObserver for TraceObserver<W> {
    fn on_behavior_updated(&mut self, frame: u64, behavior: &BehaviorRef) {
        self.pending.push(TraceRow::capture(frame, behavior));
    }

    fn on_tick_end(&mut self, _frame: u64, _visited: usize) {
        if self.pending.is_empty() {
            return;
        }
        let result = self.writer.write_rows(&self.pending);
        self.pending.clear();
        self.store_err(result);
    }

    fn on_finish(&mut self, _clock: &FrameClock) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
