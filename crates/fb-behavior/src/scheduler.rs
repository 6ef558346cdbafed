//! `Scheduler` — the service object that owns the tick registry.
//!
//! One scheduler is normally created at process start and passed around
//! explicitly rather than living in a global, so tests can run any number of
//! independent ones.
//!
//! # Ownership
//!
//! The registry holds a strong handle to every registered behavior, so a
//! behavior the host constructs and forgets keeps ticking until it is
//! disabled or destroyed.  Behaviors point back at their scheduler weakly;
//! dropping the last `Scheduler` handle drops the registry and with it every
//! behavior nobody else holds.
//!
//! # Borrow discipline
//!
//! The registry sits in a `RefCell`.  Every method borrows it for the
//! duration of one registry operation only and never while a hook runs, so
//! hooks may call back into the scheduler without conflict.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use fb_core::{BehaviorId, IdGenerator, ResortPolicy, SchedulerConfig};
use fb_registry::Registry;
use tracing::debug;

use crate::behavior::{self, Lifecycle};
use crate::{Behavior, BehaviorBuilder, BehaviorRef, Script};

struct Shared {
    config:   SchedulerConfig,
    registry: RefCell<Registry<dyn Lifecycle>>,
    ids:      RefCell<IdGenerator>,
    resorts:  Cell<u64>,
}

/// Cheaply clonable handle to the behavior registry.
///
/// `!Send` and `!Sync`: the scheduler is single-threaded by construction.
#[derive(Clone)]
pub struct Scheduler {
    shared: Rc<Shared>,
}

impl Scheduler {
    /// A scheduler with [`SchedulerConfig::default()`].
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    pub fn with_config(config: SchedulerConfig) -> Self {
        let shared = Shared {
            registry: RefCell::new(Registry::with_capacity(config.registry_capacity)),
            ids:      RefCell::new(IdGenerator::from_seed_option(config.id_seed)),
            resorts:  Cell::new(0),
            config,
        };
        debug!(policy = ?shared.config.resort_policy, "scheduler created");
        Self { shared: Rc::new(shared) }
    }

    #[inline]
    pub fn config(&self) -> &SchedulerConfig {
        &self.shared.config
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Construct a behavior with weight 0 and accumulated time 0.
    ///
    /// Runs `on_start`, then the first enable, before returning.
    pub fn spawn<S: Script>(&self, script: S) -> Behavior<S> {
        behavior::construct(self.clone(), script, 0, 0.0)
    }

    /// Start building a behavior with custom seeds.
    pub fn builder<S: Script>(&self, script: S) -> BehaviorBuilder<S> {
        BehaviorBuilder::new(self, script)
    }

    // ── Registry queries ──────────────────────────────────────────────────

    /// Number of registered behaviors.
    pub fn len(&self) -> usize {
        self.shared.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.registry.borrow().is_empty()
    }

    pub fn contains(&self, id: &BehaviorId) -> bool {
        self.shared.registry.borrow().contains(id)
    }

    /// Registered ids in current tick order.
    pub fn order(&self) -> Vec<BehaviorId> {
        self.shared.registry.borrow().ids()
    }

    /// Handles to every registered behavior in current tick order.
    ///
    /// Independent of the live registry; this is what the tick driver
    /// iterates so hooks can mutate the registry mid-tick.
    pub fn snapshot(&self) -> Vec<BehaviorRef> {
        self.shared
            .registry
            .borrow()
            .snapshot()
            .into_iter()
            .map(BehaviorRef::from_erased)
            .collect()
    }

    /// Total re-sorts performed so far.
    pub fn resort_count(&self) -> u64 {
        self.shared.resorts.get()
    }

    // ── Registry mutation ─────────────────────────────────────────────────

    /// Re-order the registry by descending weight.
    pub fn resort(&self) {
        self.shared.registry.borrow_mut().resort();
        self.shared.resorts.set(self.shared.resorts.get() + 1);
        debug!(len = self.len(), "registry resorted");
    }

    pub(crate) fn insert(&self, behavior: &BehaviorRef) {
        self.shared.registry.borrow_mut().insert(behavior.erased());
    }

    pub(crate) fn remove(&self, id: &BehaviorId) {
        self.shared.registry.borrow_mut().remove(id);
    }

    /// An update-capable behavior's weight changed.
    pub(crate) fn weight_changed(&self, id: &BehaviorId) {
        match self.shared.config.resort_policy {
            ResortPolicy::Always => self.resort(),
            ResortPolicy::MembersOnly => {
                if self.contains(id) {
                    self.resort();
                }
            }
        }
    }

    pub(crate) fn next_id(&self) -> BehaviorId {
        self.shared.ids.borrow_mut().generate()
    }

    pub(crate) fn downgrade(&self) -> WeakScheduler {
        WeakScheduler(Rc::downgrade(&self.shared))
    }
}

/// The back-reference a behavior keeps to its scheduler.
#[derive(Clone)]
pub(crate) struct WeakScheduler(Weak<Shared>);

impl WeakScheduler {
    #[inline]
    pub(crate) fn upgrade(&self) -> Option<Scheduler> {
        self.0.upgrade().map(|shared| Scheduler { shared })
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("registered", &self.len())
            .field("resorts", &self.resort_count())
            .field("config", &self.shared.config)
            .finish()
    }
}
