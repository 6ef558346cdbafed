//! Frame time model.
//!
//! # Design
//!
//! The host owns time.  It emits one [`FrameTick`] per frame carrying the
//! wall-clock milliseconds elapsed since the previous frame; the scheduler
//! never measures or adjusts that value.  The nominal cadence is
//! [`NOMINAL_FRAME_MS`] but nothing in the core depends on it being exact.
//!
//! Durations are `f64` milliseconds so fractional host deltas accumulate
//! without rounding.

use std::fmt;

/// Nominal host frame interval in milliseconds.
pub const NOMINAL_FRAME_MS: u64 = 64;

// ── FrameTick ─────────────────────────────────────────────────────────────────

/// Payload of one host frame-tick event.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameTick {
    /// Milliseconds elapsed since the previous frame.
    pub elapsed_time_ms: f64,
}

impl FrameTick {
    #[inline]
    pub fn new(elapsed_time_ms: f64) -> Self {
        Self { elapsed_time_ms }
    }
}

// ── FrameClock ────────────────────────────────────────────────────────────────

/// Counts frames delivered by the host and the total time they carried.
///
/// `FrameClock` is cheap to copy and holds no heap data.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameClock {
    /// Index of the next frame to be processed.  Starts at 0.
    pub frame: u64,
    /// Sum of every `elapsed_time_ms` seen so far.
    pub total_elapsed_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one processed frame.
    #[inline]
    pub fn advance(&mut self, tick: FrameTick) {
        self.frame += 1;
        self.total_elapsed_ms += tick.elapsed_time_ms;
    }

    /// Mean frame interval so far, or `None` before the first frame.
    pub fn mean_frame_ms(&self) -> Option<f64> {
        (self.frame > 0).then(|| self.total_elapsed_ms / self.frame as f64)
    }
}

impl fmt::Display for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{} ({:.1} ms)", self.frame, self.total_elapsed_ms)
    }
}
