//! The behavior lifecycle state machine.
//!
//! ```text
//!   Unstarted ──construct──▶ Enabled ◀──set_enabled──▶ Disabled
//!                               │                         │
//!                               └────────destroy──────────┘──▶ Destroyed
//! ```
//!
//! (`destroy` only acts on an enabled behavior; on a disabled one it returns
//! `false`.)
//!
//! All state lives in `Cell`s on a shared `Rc` allocation so that any handle,
//! including the `this` handle given to a running hook, can drive
//! transitions.  The script itself sits in a `RefCell`; see
//! [`Lifecycle::dispatch`] for how hooks re-entering the same behavior are
//! serialised.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::VecDeque;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use fb_core::BehaviorId;
use fb_registry::Weighted;
use tracing::{debug, trace, warn};

use crate::scheduler::WeakScheduler;
use crate::{BehaviorError, BehaviorResult, Hook, HookSet, Scheduler, Script};

// ── Shared state ──────────────────────────────────────────────────────────────

/// Script-independent lifecycle state.
pub(crate) struct Core {
    id:             BehaviorId,
    hooks:          HookSet,
    weight:         Cell<i64>,
    accumulated_ms: Cell<f64>,
    enabled:        Cell<bool>,
    destroyed:      Cell<bool>,
    scheduler:      WeakScheduler,
}

/// Type-erased view of a behavior, as stored in the registry.
pub(crate) trait Lifecycle: Weighted {
    fn core(&self) -> &Core;

    /// Run `hook` on the script.
    ///
    /// If the script is already borrowed (a hook of this same behavior is on
    /// the stack), the call is queued; the outermost dispatch drains the
    /// queue in FIFO order before returning.  A borrow held from outside any
    /// hook also queues the call, which then waits for the next dispatch.
    fn dispatch(&self, this: &BehaviorRef, hook: Hook);
}

struct Slot<S: Script> {
    core:    Core,
    script:  RefCell<S>,
    pending: RefCell<VecDeque<Hook>>,
    running: Cell<bool>,
}

impl<S: Script> Weighted for Slot<S> {
    #[inline]
    fn key(&self) -> BehaviorId {
        self.core.id
    }

    #[inline]
    fn weight(&self) -> i64 {
        self.core.weight.get()
    }
}

impl<S: Script> Lifecycle for Slot<S> {
    #[inline]
    fn core(&self) -> &Core {
        &self.core
    }

    fn dispatch(&self, this: &BehaviorRef, hook: Hook) {
        self.pending.borrow_mut().push_back(hook);

        let Ok(mut script) = self.script.try_borrow_mut() else {
            if self.running.get() {
                trace!(id = %self.core.id, ?hook, "hook deferred until running hook returns");
            } else {
                warn!(id = %self.core.id, ?hook, "script borrowed outside a hook; hook queued until the next dispatch");
            }
            return;
        };

        self.running.set(true);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(hook) = next else { break };
            match hook {
                Hook::Start         => script.on_start(this),
                Hook::Update(delta) => script.on_update(this, delta),
                Hook::Enable        => script.on_enable(this),
                Hook::Disable       => script.on_disable(this),
                Hook::Restore       => script.on_restore(this),
                Hook::Destroy       => script.on_destroy(this),
            }
        }
        self.running.set(false);
    }
}

fn check_time(ms: f64) -> BehaviorResult<f64> {
    if ms.is_finite() && ms >= 0.0 {
        Ok(ms)
    } else {
        Err(BehaviorError::InvalidTime(ms))
    }
}

// ── BehaviorRef ───────────────────────────────────────────────────────────────

/// Type-erased, reference-counted handle to a behavior.
///
/// This is the public behavior interface: what hooks receive as `this`, what
/// the tick driver iterates, and what [`Behavior<S>`] derefs to.  Cloning is
/// an `Rc` clone; every clone drives the same behavior.
#[derive(Clone)]
pub struct BehaviorRef(Rc<dyn Lifecycle>);

impl BehaviorRef {
    #[inline]
    fn core(&self) -> &Core {
        self.0.core()
    }

    #[inline]
    pub(crate) fn erased(&self) -> &Rc<dyn Lifecycle> {
        &self.0
    }

    pub(crate) fn from_erased(inner: Rc<dyn Lifecycle>) -> Self {
        BehaviorRef(inner)
    }

    // ── Read-only state ───────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> BehaviorId {
        self.core().id
    }

    /// The hooks this behavior's script declared.
    #[inline]
    pub fn hooks(&self) -> HookSet {
        self.core().hooks
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.core().destroyed.get()
    }

    /// `true` while this behavior is a tick-registry member.
    pub fn is_registered(&self) -> bool {
        self.scheduler().is_some_and(|s| s.contains(&self.id()))
    }

    /// The scheduler this behavior was constructed on, or `None` once every
    /// handle to that scheduler has been dropped.
    #[inline]
    pub fn scheduler(&self) -> Option<Scheduler> {
        self.core().scheduler.upgrade()
    }

    pub fn downgrade(&self) -> WeakBehaviorRef {
        WeakBehaviorRef(Rc::downgrade(&self.0))
    }

    // ── Weight ────────────────────────────────────────────────────────────

    #[inline]
    pub fn weight(&self) -> i64 {
        self.core().weight.get()
    }

    /// Change the scheduling weight.
    ///
    /// Writing the current value is a no-op.  Otherwise, if the behavior
    /// declares an update hook, the scheduler is asked to re-sort; whether it
    /// does so for a behavior that is not currently registered depends on its
    /// [`ResortPolicy`][fb_core::ResortPolicy].
    pub fn set_weight(&self, weight: i64) {
        let core = self.core();
        let old = core.weight.replace(weight);
        if old == weight {
            return;
        }
        debug!(id = %core.id, old, new = weight, "weight changed");
        if !core.hooks.ticks() {
            return;
        }
        if let Some(scheduler) = self.scheduler() {
            scheduler.weight_changed(&core.id);
        }
    }

    // ── Accumulated time ──────────────────────────────────────────────────

    /// Total milliseconds this behavior has been updated for, plus its
    /// construction seed.
    #[inline]
    pub fn accumulated_time(&self) -> f64 {
        self.core().accumulated_ms.get()
    }

    /// Overwrite the accumulated time.  Rejects negative and non-finite
    /// values.
    pub fn set_accumulated_time(&self, ms: f64) -> BehaviorResult<()> {
        self.core().accumulated_ms.set(check_time(ms)?);
        Ok(())
    }

    // ── Enablement ────────────────────────────────────────────────────────

    #[inline]
    pub fn enabled(&self) -> bool {
        self.core().enabled.get()
    }

    /// Enable or disable.  Writing the current value is a no-op.
    ///
    /// Enabling a destroyed behavior is refused: destruction is terminal.
    pub fn set_enabled(&self, enabled: bool) {
        let core = self.core();
        if core.enabled.get() == enabled {
            return;
        }
        if !enabled {
            self.disable();
        } else if core.destroyed.get() {
            warn!(id = %core.id, "ignoring enable on a destroyed behavior");
        } else {
            self.enable();
        }
    }

    /// Enable transition, shared by construction and `set_enabled(true)`.
    pub(crate) fn enable(&self) {
        let core = self.core();
        core.enabled.set(true);
        if core.hooks.ticks() {
            if let Some(scheduler) = self.scheduler() {
                scheduler.insert(self);
                if core.weight.get() != 0 {
                    scheduler.resort();
                }
            }
        }
        debug!(id = %core.id, "enabled");
        self.fire(Hook::Enable);
    }

    fn disable(&self) {
        let core = self.core();
        core.enabled.set(false);
        self.unregister();
        debug!(id = %core.id, "disabled");
        self.fire(Hook::Disable);
    }

    fn unregister(&self) {
        if !self.hooks().ticks() {
            return;
        }
        if let Some(scheduler) = self.scheduler() {
            scheduler.remove(&self.id());
        }
    }

    // ── Destroy / restore / update ────────────────────────────────────────

    /// Permanently stop this behavior.
    ///
    /// Returns `false` and does nothing if the behavior is currently
    /// disabled (which includes already destroyed).  Otherwise disables it,
    /// runs `on_disable`, removes it from the registry, runs `on_destroy`,
    /// and returns `true`.
    pub fn destroy(&self) -> bool {
        let core = self.core();
        if !core.enabled.get() {
            return false;
        }
        core.enabled.set(false);
        core.destroyed.set(true);
        self.fire(Hook::Disable);
        self.unregister();
        debug!(id = %core.id, "destroyed");
        self.fire(Hook::Destroy);
        true
    }

    /// Notify the script to reset itself.  No lifecycle state changes.
    pub fn restore(&self) {
        self.fire(Hook::Restore);
    }

    /// Advance by `delta_ms`: add it to the accumulated time, then run
    /// `on_update`.
    ///
    /// Works regardless of enablement; the tick driver only calls it for
    /// registered behaviors.
    pub fn update(&self, delta_ms: f64) {
        let core = self.core();
        core.accumulated_ms.set(core.accumulated_ms.get() + delta_ms);
        self.fire(Hook::Update(delta_ms));
    }

    /// Run `hook` if the script declared it.
    pub(crate) fn fire(&self, hook: Hook) {
        if self.core().hooks.contains(hook.flag()) {
            self.0.dispatch(self, hook);
        }
    }
}

impl PartialEq for BehaviorRef {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for BehaviorRef {}

impl fmt::Debug for BehaviorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorRef")
            .field("id", &self.id())
            .field("weight", &self.weight())
            .field("accumulated_time", &self.accumulated_time())
            .field("enabled", &self.enabled())
            .field("destroyed", &self.is_destroyed())
            .field("hooks", &self.hooks())
            .finish()
    }
}

/// Non-owning [`BehaviorRef`].  Lets scripts refer to one another without
/// creating `Rc` cycles.
#[derive(Clone)]
pub struct WeakBehaviorRef(Weak<dyn Lifecycle>);

impl WeakBehaviorRef {
    /// `None` once every strong handle has been dropped.
    pub fn upgrade(&self) -> Option<BehaviorRef> {
        self.0.upgrade().map(BehaviorRef)
    }
}

// ── Behavior<S> ───────────────────────────────────────────────────────────────

/// Typed handle to a behavior running script `S`.
///
/// Derefs to [`BehaviorRef`] for the lifecycle interface and adds access to
/// the script state.  Create through [`Scheduler::spawn`] or
/// [`Scheduler::builder`].
pub struct Behavior<S: Script> {
    slot:   Rc<Slot<S>>,
    erased: BehaviorRef,
}

impl<S: Script> Behavior<S> {
    /// Borrow the script state.
    ///
    /// Do not hold the borrow across lifecycle calls on this behavior: hooks
    /// dispatched while it is held are queued (with a warning) until the next
    /// dispatch on this behavior.
    ///
    /// # Panics
    /// Panics if a hook of this behavior is currently running.
    pub fn script(&self) -> Ref<'_, S> {
        self.slot.script.borrow()
    }

    /// Mutably borrow the script state.  Same caveats as [`script`][Self::script].
    pub fn script_mut(&self) -> RefMut<'_, S> {
        self.slot.script.borrow_mut()
    }

    /// A type-erased handle to the same behavior.
    #[inline]
    pub fn handle(&self) -> BehaviorRef {
        self.erased.clone()
    }
}

impl<S: Script> Clone for Behavior<S> {
    fn clone(&self) -> Self {
        Self { slot: Rc::clone(&self.slot), erased: self.erased.clone() }
    }
}

impl<S: Script> Deref for Behavior<S> {
    type Target = BehaviorRef;

    #[inline]
    fn deref(&self) -> &BehaviorRef {
        &self.erased
    }
}

impl<S: Script> fmt::Debug for Behavior<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.erased, f)
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// Fluent builder for a [`Behavior<S>`] with non-default seeds.
///
/// # Example
///
/// ```rust,ignore
/// let b = scheduler.builder(Spinner::default())
///     .weight(10)
///     .accumulated_time(250.0)
///     .spawn()?;
/// ```
pub struct BehaviorBuilder<S: Script> {
    scheduler:      Scheduler,
    script:         S,
    weight:         i64,
    accumulated_ms: f64,
}

impl<S: Script> BehaviorBuilder<S> {
    pub fn new(scheduler: &Scheduler, script: S) -> Self {
        Self { scheduler: scheduler.clone(), script, weight: 0, accumulated_ms: 0.0 }
    }

    /// Initial weight.  Default: 0.
    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    /// Initial accumulated time in milliseconds.  Default: 0.
    pub fn accumulated_time(mut self, ms: f64) -> Self {
        self.accumulated_ms = ms;
        self
    }

    /// Validate the seeds, then construct: `on_start`, then the first enable.
    pub fn spawn(self) -> BehaviorResult<Behavior<S>> {
        let accumulated_ms = check_time(self.accumulated_ms)?;
        Ok(construct(self.scheduler, self.script, self.weight, accumulated_ms))
    }
}

/// Construction sequence.  Seeds must already be valid.
pub(crate) fn construct<S: Script>(
    scheduler:      Scheduler,
    script:         S,
    weight:         i64,
    accumulated_ms: f64,
) -> Behavior<S> {
    let id = scheduler.next_id();
    let slot = Rc::new(Slot {
        core: Core {
            id,
            hooks:          S::HOOKS,
            weight:         Cell::new(weight),
            accumulated_ms: Cell::new(accumulated_ms),
            enabled:        Cell::new(false),
            destroyed:      Cell::new(false),
            scheduler:      scheduler.downgrade(),
        },
        script:  RefCell::new(script),
        pending: RefCell::new(VecDeque::new()),
        running: Cell::new(false),
    });
    let erased: Rc<dyn Lifecycle> = slot.clone();
    let erased = BehaviorRef(erased);

    debug!(%id, weight, hooks = ?S::HOOKS, "behavior constructed");
    erased.fire(Hook::Start);
    // `on_start` may already have enabled the behavior itself.
    if !erased.enabled() && !erased.is_destroyed() {
        erased.enable();
    }

    Behavior { slot, erased }
}
