//! Frame-tick event sources.
//!
//! The host decides when frames happen and how much time each one carries.
//! [`FrameHost`] is the seam: an embedding application implements it over
//! its own event loop, or uses one of the two hosts provided here.
//!
//! | Host           | Use                                                     |
//! |----------------|---------------------------------------------------------|
//! | [`ManualHost`] | Tests and embedders that already own a loop             |
//! | [`PacedHost`]  | Stand-alone runs; sleeps to the nominal frame interval  |

use std::thread;
use std::time::{Duration, Instant};

use fb_core::{FrameTick, SchedulerConfig};
use tracing::trace;

use crate::{DriverError, DriverResult};

/// Callback invoked once per frame.
pub type FrameHandler = Box<dyn FnMut(FrameTick)>;

/// A source of frame-tick events.
pub trait FrameHost {
    /// Register `handler` to be called on every subsequent frame.
    fn subscribe(&mut self, handler: FrameHandler);
}

// ── ManualHost ────────────────────────────────────────────────────────────────

/// Emits a frame whenever [`emit`][Self::emit] is called.
#[derive(Default)]
pub struct ManualHost {
    subscribers: Vec<FrameHandler>,
    emitted:     u64,
}

impl ManualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one frame carrying `elapsed_time_ms` to every subscriber.
    pub fn emit(&mut self, elapsed_time_ms: f64) {
        let tick = FrameTick::new(elapsed_time_ms);
        for handler in &mut self.subscribers {
            handler(tick);
        }
        self.emitted += 1;
    }

    /// Deliver `n` frames of equal length.
    pub fn emit_n(&mut self, n: u64, elapsed_time_ms: f64) {
        for _ in 0..n {
            self.emit(elapsed_time_ms);
        }
    }

    /// Frames emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl FrameHost for ManualHost {
    fn subscribe(&mut self, handler: FrameHandler) {
        self.subscribers.push(handler);
    }
}

// ── PacedHost ─────────────────────────────────────────────────────────────────

/// Emits frames in real time, aiming for a fixed interval.
///
/// Each frame carries the wall-clock time actually elapsed since the
/// previous one, so oversleeping or a slow frame shows up in the delta
/// rather than being hidden.
pub struct PacedHost {
    interval:    Duration,
    subscribers: Vec<FrameHandler>,
}

impl PacedHost {
    /// A host paced at `config.nominal_frame_ms`.
    pub fn new(config: &SchedulerConfig) -> DriverResult<Self> {
        config.validate()?;
        Ok(Self { interval: config.nominal_frame(), subscribers: Vec::new() })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block for `frames` frames, delivering each to every subscriber.
    pub fn run_frames(&mut self, frames: u64) -> DriverResult<()> {
        if self.subscribers.is_empty() {
            return Err(DriverError::NoSubscribers);
        }
        let mut last = Instant::now();
        for _ in 0..frames {
            let deadline = last + self.interval;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
            let now = Instant::now();
            let elapsed_ms = now.duration_since(last).as_secs_f64() * 1_000.0;
            last = now;

            trace!(elapsed_ms, "paced frame");
            let tick = FrameTick::new(elapsed_ms);
            for handler in &mut self.subscribers {
                handler(tick);
            }
        }
        Ok(())
    }
}

impl FrameHost for PacedHost {
    fn subscribe(&mut self, handler: FrameHandler) {
        self.subscribers.push(handler);
    }
}
