//! The `TraceWriter` trait implemented by all backend writers.

use crate::{OutputResult, TraceRow};

/// Trait implemented by trace backends.
///
/// Errors are returned to the caller; [`TraceObserver`][crate::TraceObserver]
/// stores them because observer callbacks have no return value.
pub trait TraceWriter {
    /// Write one frame's rows.
    fn write_rows(&mut self, rows: &[TraceRow]) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
