//! The `TickDriver` and its per-frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use fb_behavior::Scheduler;
use fb_core::{FrameClock, FrameTick};
use tracing::{debug, trace};

use crate::{DriverObserver, FrameHost, NoopObserver};

/// Drives every registered behavior once per host frame.
///
/// Each frame:
///
/// 1. **Snapshot**: copy the registry's current order into a `Vec` of
///    strong handles.
/// 2. **Visit**: call [`update`][fb_behavior::BehaviorRef::update] on each
///    handle in that order.
///
/// Hooks running in step 2 may insert, remove, re-weight, or destroy any
/// behavior.  Those changes land in the live registry and are seen from the
/// next frame on; the snapshot being visited is never touched.  A behavior
/// destroyed mid-frame by an earlier one is therefore still visited this
/// frame, and never again.
///
/// Use [`attach`][Self::attach] to subscribe to a host, or call
/// [`on_frame`][Self::on_frame] directly from your own loop.
pub struct TickDriver<O: DriverObserver = NoopObserver> {
    scheduler: Scheduler,
    clock:     FrameClock,
    observer:  O,
}

impl TickDriver<NoopObserver> {
    pub fn new(scheduler: &Scheduler) -> Self {
        Self::with_observer(scheduler, NoopObserver)
    }
}

impl<O: DriverObserver> TickDriver<O> {
    pub fn with_observer(scheduler: &Scheduler, observer: O) -> Self {
        Self { scheduler: scheduler.clone(), clock: FrameClock::new(), observer }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Process one frame.  Returns the number of behaviors visited.
    pub fn on_frame(&mut self, tick: FrameTick) -> usize {
        let frame = self.clock.frame;
        self.observer.on_tick_start(frame, tick);

        let snapshot = self.scheduler.snapshot();
        for behavior in &snapshot {
            behavior.update(tick.elapsed_time_ms);
            self.observer.on_behavior_updated(frame, behavior);
        }

        self.clock.advance(tick);
        self.observer.on_tick_end(frame, snapshot.len());
        trace!(frame, visited = snapshot.len(), elapsed_ms = tick.elapsed_time_ms, "frame done");
        snapshot.len()
    }

    /// Subscribe to `host`.
    ///
    /// Consumes the driver, so a driver subscribes at most once.  The
    /// returned handle shares ownership with the host's callback and gives
    /// read access to the clock and observer between frames.
    pub fn attach<H: FrameHost>(self, host: &mut H) -> DriverHandle<O>
    where
        O: 'static,
    {
        let shared = Rc::new(RefCell::new(self));
        let target = Rc::clone(&shared);
        host.subscribe(Box::new(move |tick| {
            target.borrow_mut().on_frame(tick);
        }));
        debug!("tick driver subscribed to host");
        DriverHandle { shared }
    }

    /// Notify the observer that no more frames will be processed.
    pub fn finish(&mut self) {
        self.observer.on_finish(&self.clock);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn clock(&self) -> FrameClock {
        self.clock
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }
}

// ── DriverHandle ──────────────────────────────────────────────────────────────

/// Shared handle to a driver that has been attached to a host.
///
/// # Panics
/// Every method borrows the driver; calling one from inside a behavior hook
/// (i.e. while the driver is processing a frame) panics.
pub struct DriverHandle<O: DriverObserver> {
    shared: Rc<RefCell<TickDriver<O>>>,
}

impl<O: DriverObserver> DriverHandle<O> {
    pub fn clock(&self) -> FrameClock {
        self.shared.borrow().clock()
    }

    /// Frames processed so far.
    pub fn frames(&self) -> u64 {
        self.clock().frame
    }

    /// Run `f` with mutable access to the observer.
    pub fn with_observer<R>(&self, f: impl FnOnce(&mut O) -> R) -> R {
        f(self.shared.borrow_mut().observer_mut())
    }

    /// See [`TickDriver::finish`].
    pub fn finish(&self) {
        self.shared.borrow_mut().finish();
    }
}
