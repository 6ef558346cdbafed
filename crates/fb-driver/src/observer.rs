//! Driver observer trait for progress reporting and data collection.

use fb_behavior::BehaviorRef;
use fb_core::{FrameClock, FrameTick};

/// Callbacks invoked by [`TickDriver::on_frame`][crate::TickDriver::on_frame]
/// at key points of each frame.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — frame counter
///
/// ```rust,ignore
/// struct SlowFrames { over_ms: f64, count: usize }
///
/// impl DriverObserver for SlowFrames {
///     fn on_tick_start(&mut self, _frame: u64, tick: FrameTick) {
///         if tick.elapsed_time_ms > self.over_ms {
///             self.count += 1;
///         }
///     }
/// }
/// ```
pub trait DriverObserver {
    /// Called before the registry snapshot is taken.
    fn on_tick_start(&mut self, _frame: u64, _tick: FrameTick) {}

    /// Called after each behavior's update step, in visit order.
    fn on_behavior_updated(&mut self, _frame: u64, _behavior: &BehaviorRef) {}

    /// Called at the end of each frame.  `visited` is the snapshot length.
    fn on_tick_end(&mut self, _frame: u64, _visited: usize) {}

    /// Called once when the driver is finished with.
    fn on_finish(&mut self, _clock: &FrameClock) {}
}

/// A [`DriverObserver`] that does nothing.
pub struct NoopObserver;

impl DriverObserver for NoopObserver {}
