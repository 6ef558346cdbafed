//! Unit tests for fb-behavior.

use std::cell::RefCell;
use std::rc::Rc;

use fb_core::{ResortPolicy, SchedulerConfig};

use crate::{BehaviorRef, HookSet, Scheduler, Script};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// What a hook saw when it ran.
#[derive(Debug, Clone, PartialEq)]
struct Seen {
    hook:       &'static str,
    enabled:    bool,
    registered: bool,
}

type Log = Rc<RefCell<Vec<Seen>>>;

fn record(log: &Log, hook: &'static str, this: &BehaviorRef) {
    log.borrow_mut().push(Seen {
        hook,
        enabled:    this.enabled(),
        registered: this.is_registered(),
    });
}

fn seen(hook: &'static str, enabled: bool, registered: bool) -> Seen {
    Seen { hook, enabled, registered }
}

fn hooks_of(log: &Log) -> Vec<&'static str> {
    log.borrow().iter().map(|s| s.hook).collect()
}

/// Declares every hook and records each call.
struct Recorder {
    log: Log,
}

impl Script for Recorder {
    const HOOKS: HookSet = HookSet::ALL;

    fn on_start(&mut self, this: &BehaviorRef) {
        record(&self.log, "start", this);
    }
    fn on_update(&mut self, this: &BehaviorRef, _delta_ms: f64) {
        record(&self.log, "update", this);
    }
    fn on_enable(&mut self, this: &BehaviorRef) {
        record(&self.log, "enable", this);
    }
    fn on_disable(&mut self, this: &BehaviorRef) {
        record(&self.log, "disable", this);
    }
    fn on_restore(&mut self, this: &BehaviorRef) {
        record(&self.log, "restore", this);
    }
    fn on_destroy(&mut self, this: &BehaviorRef) {
        record(&self.log, "destroy", this);
    }
}

/// Every hook except `UPDATE`: never joins the registry.
struct Passive {
    log: Log,
}

impl Script for Passive {
    const HOOKS: HookSet = HookSet::START
        .union(HookSet::ENABLE)
        .union(HookSet::DISABLE)
        .union(HookSet::RESTORE)
        .union(HookSet::DESTROY);

    fn on_start(&mut self, this: &BehaviorRef) {
        record(&self.log, "start", this);
    }
    fn on_enable(&mut self, this: &BehaviorRef) {
        record(&self.log, "enable", this);
    }
    fn on_disable(&mut self, this: &BehaviorRef) {
        record(&self.log, "disable", this);
    }
    // Overridden but not declared: must never run.
    fn on_update(&mut self, this: &BehaviorRef, _delta_ms: f64) {
        record(&self.log, "update", this);
    }
}

/// Ticks and does nothing else.
struct Ticker;

impl Script for Ticker {
    const HOOKS: HookSet = HookSet::UPDATE;
}

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn seeded() -> Scheduler {
    Scheduler::with_config(SchedulerConfig { id_seed: Some(11), ..Default::default() })
}

// ── HookSet ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod hookset_tests {
    use super::*;

    #[test]
    fn union_and_contains() {
        let set = HookSet::UPDATE | HookSet::DESTROY;
        assert!(set.contains(HookSet::UPDATE));
        assert!(set.contains(HookSet::DESTROY));
        assert!(!set.contains(HookSet::START));
        assert!(set.ticks());
        assert!(HookSet::ALL.contains(set));
        assert!(HookSet::NONE.is_empty());
        assert!(!Passive::HOOKS.ticks());
    }

    #[test]
    fn debug_lists_names() {
        let set = HookSet::START.union(HookSet::UPDATE);
        assert_eq!(format!("{set:?}"), r#"{"start", "update"}"#);
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction_tests {
    use super::*;
    use crate::{BehaviorError, NoopScript};

    #[test]
    fn first_enable_registers_ticking_behavior() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(Recorder { log: log.clone() });

        assert!(b.enabled());
        assert!(b.is_registered());
        assert_eq!(sched.len(), 1);
        assert_eq!(b.weight(), 0);
        assert_eq!(b.accumulated_time(), 0.0);
        // on_start sees the behavior disabled and unregistered; on_enable
        // sees both already established.
        assert_eq!(*log.borrow(), vec![seen("start", false, false), seen("enable", true, true)]);
    }

    #[test]
    fn non_ticking_behavior_is_enabled_but_not_registered() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(Passive { log: log.clone() });

        assert!(b.enabled());
        assert!(!b.is_registered());
        assert!(sched.is_empty());
        assert_eq!(*log.borrow(), vec![seen("start", false, false), seen("enable", true, false)]);

        let n = sched.spawn(NoopScript);
        assert!(n.enabled());
        assert!(!n.is_registered());
    }

    /// Enables itself from `on_start`, before the automatic first enable.
    struct EagerStart {
        log: Log,
    }

    impl Script for EagerStart {
        const HOOKS: HookSet = HookSet::START
            .union(HookSet::UPDATE)
            .union(HookSet::ENABLE);

        fn on_start(&mut self, this: &BehaviorRef) {
            record(&self.log, "start", this);
            this.set_enabled(true);
        }
        fn on_enable(&mut self, this: &BehaviorRef) {
            record(&self.log, "enable", this);
        }
    }

    #[test]
    fn enable_from_on_start_is_not_repeated() {
        let sched = seeded();
        let log = new_log();
        let b = sched.builder(EagerStart { log: log.clone() }).weight(3).spawn().unwrap();

        assert!(b.enabled());
        assert_eq!(sched.len(), 1);
        assert_eq!(sched.resort_count(), 1);
        assert_eq!(*log.borrow(), vec![seen("start", false, false), seen("enable", true, true)]);
    }

    #[test]
    fn zero_weight_does_not_resort() {
        let sched = seeded();
        let _a = sched.spawn(Ticker);
        let _b = sched.spawn(Ticker);
        assert_eq!(sched.resort_count(), 0);
    }

    #[test]
    fn builder_seeds_weight_and_time() {
        let sched = seeded();
        let b = sched.builder(Ticker).weight(-4).accumulated_time(125.5).spawn().unwrap();
        assert_eq!(b.weight(), -4);
        assert_eq!(b.accumulated_time(), 125.5);
        assert_eq!(sched.resort_count(), 1);
    }

    #[test]
    fn builder_rejects_invalid_time() {
        let sched = seeded();
        assert!(matches!(
            sched.builder(Ticker).accumulated_time(-1.0).spawn(),
            Err(BehaviorError::InvalidTime(_))
        ));
        assert!(sched.builder(Ticker).accumulated_time(f64::NAN).spawn().is_err());
        assert!(sched.is_empty(), "rejected builds never construct");
    }

    #[test]
    fn ids_are_unique_and_reproducible() {
        let a = seeded().spawn(Ticker).id();
        let b = seeded().spawn(Ticker).id();
        assert_eq!(a, b, "same seed, same first id");

        let sched = seeded();
        let x = sched.spawn(Ticker);
        let y = sched.spawn(Ticker);
        assert_ne!(x.id(), y.id());
        assert_eq!(x.id().to_string().len(), 36);
    }
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ordering_tests {
    use super::*;

    #[test]
    fn heavier_behavior_constructed_later_runs_first() {
        let sched = seeded();
        let a = sched.builder(Ticker).weight(5).spawn().unwrap();
        let b = sched.builder(Ticker).weight(10).spawn().unwrap();
        assert_eq!(sched.order(), vec![b.id(), a.id()]);

        a.set_weight(20);
        assert_eq!(sched.order(), vec![a.id(), b.id()]);
    }

    #[test]
    fn order_is_non_increasing_after_any_resort() {
        let sched = seeded();
        let weights = [3, -1, 8, 0, 8, 2, -7, 5];
        let all: Vec<_> = weights
            .iter()
            .map(|&w| sched.builder(Ticker).weight(w).spawn().unwrap())
            .collect();
        all[3].set_weight(9);
        all[6].set_weight(4);

        let snap = sched.snapshot();
        assert_eq!(snap.len(), weights.len());
        assert!(snap.windows(2).all(|p| p[0].weight() >= p[1].weight()));
    }

    #[test]
    fn unchanged_weight_is_a_no_op() {
        let sched = seeded();
        let a = sched.builder(Ticker).weight(3).spawn().unwrap();
        let before = sched.resort_count();
        a.set_weight(3);
        assert_eq!(sched.resort_count(), before);
    }

    #[test]
    fn weight_on_non_ticking_behavior_never_resorts() {
        let sched = seeded();
        let p = sched.spawn(Passive { log: new_log() });
        p.set_weight(50);
        assert_eq!(p.weight(), 50);
        assert_eq!(sched.resort_count(), 0);
    }

    #[test]
    fn weight_on_disabled_ticker_resorts_by_default() {
        let sched = seeded();
        let a = sched.spawn(Ticker);
        a.set_enabled(false);
        assert!(!a.is_registered());

        a.set_weight(7);
        assert_eq!(sched.resort_count(), 1);
    }

    #[test]
    fn members_only_policy_skips_non_member_resort() {
        let sched = Scheduler::with_config(SchedulerConfig {
            resort_policy: ResortPolicy::MembersOnly,
            ..Default::default()
        });
        let a = sched.spawn(Ticker);
        a.set_enabled(false);
        a.set_weight(7);
        assert_eq!(sched.resort_count(), 0);

        // Re-enabling with a non-zero weight still resorts.
        a.set_enabled(true);
        assert_eq!(sched.resort_count(), 1);
        a.set_weight(8);
        assert_eq!(sched.resort_count(), 2);
    }

    #[test]
    fn re_enable_appends_then_resorts_if_weighted() {
        let sched = seeded();
        let a = sched.spawn(Ticker);
        let b = sched.spawn(Ticker);
        a.set_enabled(false);
        a.set_enabled(true);
        assert_eq!(sched.order(), vec![b.id(), a.id()], "zero weight keeps insertion order");

        b.set_enabled(false);
        b.set_weight(1);
        b.set_enabled(true);
        assert_eq!(sched.order(), vec![b.id(), a.id()]);
    }
}

// ── Enable / disable ──────────────────────────────────────────────────────────

#[cfg(test)]
mod enablement_tests {
    use super::*;

    #[test]
    fn enable_twice_has_effects_once() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(Recorder { log: log.clone() });
        b.set_enabled(false);
        b.set_enabled(true);
        b.set_enabled(true);
        assert_eq!(hooks_of(&log), vec!["start", "enable", "disable", "enable"]);
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn disable_twice_has_effects_once() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(Recorder { log: log.clone() });
        b.set_enabled(false);
        b.set_enabled(false);
        assert_eq!(hooks_of(&log), vec!["start", "enable", "disable"]);
        assert_eq!(log.borrow()[2], seen("disable", false, false));
        assert!(sched.is_empty());
    }
}

// ── Destroy / restore ─────────────────────────────────────────────────────────

#[cfg(test)]
mod destroy_tests {
    use super::*;

    #[test]
    fn destroy_enabled_behavior() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(Recorder { log: log.clone() });
        log.borrow_mut().clear();

        assert!(b.destroy());
        assert!(!b.enabled());
        assert!(b.is_destroyed());
        assert!(!b.is_registered());
        // on_disable runs before registry removal; on_destroy after.
        assert_eq!(
            *log.borrow(),
            vec![seen("disable", false, true), seen("destroy", false, false)]
        );
    }

    #[test]
    fn destroy_twice_returns_false() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(Recorder { log: log.clone() });
        assert!(b.destroy());
        let calls = log.borrow().len();
        assert!(!b.destroy());
        assert_eq!(log.borrow().len(), calls);
    }

    #[test]
    fn destroy_disabled_behavior_is_a_no_op() {
        let sched = seeded();
        let log = new_log();
        let b = sched.builder(Recorder { log: log.clone() }).weight(2).spawn().unwrap();
        b.set_enabled(false);
        let calls = log.borrow().len();

        assert!(!b.destroy());
        assert!(!b.is_destroyed());
        assert!(!b.enabled());
        assert_eq!(b.weight(), 2);
        assert_eq!(log.borrow().len(), calls);

        // Not destroyed, so it can still come back.
        b.set_enabled(true);
        assert!(b.is_registered());
    }

    #[test]
    fn destroyed_behavior_cannot_be_re_enabled() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(Recorder { log: log.clone() });
        b.destroy();
        let calls = log.borrow().len();
        b.set_enabled(true);
        assert!(!b.enabled());
        assert!(!b.is_registered());
        assert_eq!(log.borrow().len(), calls);
    }

    #[test]
    fn destroy_non_ticking_behavior() {
        let sched = seeded();
        let log = new_log();
        let p = sched.spawn(Passive { log: log.clone() });
        assert!(p.destroy());
        // DESTROY is declared but Passive does not override it; DISABLE is.
        assert_eq!(hooks_of(&log), vec!["start", "enable", "disable"]);
    }

    #[test]
    fn hooks_held_back_by_a_script_borrow_run_on_next_dispatch() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(Recorder { log: log.clone() });
        {
            let _held = b.script();
            assert!(b.destroy());
        }
        assert!(b.is_destroyed());
        assert!(!b.is_registered());
        assert_eq!(hooks_of(&log), vec!["start", "enable"]);

        b.restore();
        assert_eq!(hooks_of(&log), vec!["start", "enable", "disable", "destroy", "restore"]);
    }

    #[test]
    fn restore_only_notifies() {
        let sched = seeded();
        let log = new_log();
        let b = sched.builder(Recorder { log: log.clone() }).weight(4).accumulated_time(10.0).spawn().unwrap();
        log.borrow_mut().clear();
        let resorts = sched.resort_count();

        b.restore();
        assert_eq!(*log.borrow(), vec![seen("restore", true, true)]);
        assert_eq!(b.weight(), 4);
        assert_eq!(b.accumulated_time(), 10.0);
        assert_eq!(sched.resort_count(), resorts);
    }
}

// ── Update step ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod update_tests {
    use super::*;
    use crate::BehaviorError;

    #[test]
    fn update_adds_delta_and_calls_hook() {
        let sched = seeded();
        let log = new_log();
        let b = sched.builder(Recorder { log: log.clone() }).accumulated_time(5.0).spawn().unwrap();
        b.update(64.0);
        b.update(0.5);
        assert_eq!(b.accumulated_time(), 69.5);
        assert_eq!(hooks_of(&log), vec!["start", "enable", "update", "update"]);
    }

    #[test]
    fn update_works_while_disabled() {
        let sched = seeded();
        let b = sched.spawn(Ticker);
        b.set_enabled(false);
        b.update(32.0);
        assert_eq!(b.accumulated_time(), 32.0);
    }

    #[test]
    fn undeclared_update_hook_never_runs() {
        let sched = seeded();
        let log = new_log();
        let p = sched.spawn(Passive { log: log.clone() });
        p.update(16.0);
        assert_eq!(p.accumulated_time(), 16.0);
        assert!(!hooks_of(&log).contains(&"update"));
    }

    #[test]
    fn set_accumulated_time_validates() {
        let sched = seeded();
        let b = sched.spawn(Ticker);
        b.set_accumulated_time(1_000.0).unwrap();
        assert_eq!(b.accumulated_time(), 1_000.0);
        assert!(matches!(b.set_accumulated_time(-0.5), Err(BehaviorError::InvalidTime(_))));
        assert!(b.set_accumulated_time(f64::INFINITY).is_err());
        assert_eq!(b.accumulated_time(), 1_000.0);
    }
}

// ── Re-entrant hooks ──────────────────────────────────────────────────────────

#[cfg(test)]
mod reentrancy_tests {
    use super::*;

    /// Destroys itself on its first update.
    struct SelfDestruct {
        log: Log,
    }

    impl Script for SelfDestruct {
        const HOOKS: HookSet = HookSet::UPDATE
            .union(HookSet::DISABLE)
            .union(HookSet::DESTROY);

        fn on_update(&mut self, this: &BehaviorRef, _delta_ms: f64) {
            record(&self.log, "update", this);
            assert!(this.destroy());
            // State changed synchronously even though the hooks are queued.
            assert!(!this.enabled());
            assert!(!this.is_registered());
            record(&self.log, "update-end", this);
        }
        fn on_disable(&mut self, this: &BehaviorRef) {
            record(&self.log, "disable", this);
        }
        fn on_destroy(&mut self, this: &BehaviorRef) {
            record(&self.log, "destroy", this);
        }
    }

    #[test]
    fn nested_hooks_run_after_current_hook() {
        let sched = seeded();
        let log = new_log();
        let b = sched.spawn(SelfDestruct { log: log.clone() });
        b.update(10.0);
        assert_eq!(hooks_of(&log), vec!["update", "update-end", "disable", "destroy"]);
        assert!(b.is_destroyed());
        assert!(sched.is_empty());
    }

    /// Spawns a child behavior and re-weights itself on every update.
    struct Spawner {
        children: Vec<BehaviorRef>,
    }

    impl Script for Spawner {
        const HOOKS: HookSet = HookSet::UPDATE;

        fn on_update(&mut self, this: &BehaviorRef, _delta_ms: f64) {
            let child = this.scheduler().unwrap().builder(Ticker).weight(1).spawn().unwrap();
            self.children.push(child.handle());
            this.set_weight(this.weight() - 1);
        }
    }

    #[test]
    fn hooks_can_mutate_the_registry() {
        let sched = seeded();
        let s = sched.spawn(Spawner { children: Vec::new() });
        s.update(1.0);
        s.update(1.0);

        assert_eq!(sched.len(), 3);
        assert_eq!(s.weight(), -2);
        assert_eq!(s.script().children.len(), 2);
        assert_eq!(sched.order().last(), Some(&s.id()));
    }
}

// ── Handles ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod handle_tests {
    use super::*;

    #[test]
    fn handles_share_state() {
        let sched = seeded();
        let b = sched.spawn(Ticker);
        let h = b.handle();
        h.set_weight(9);
        assert_eq!(b.weight(), 9);
        assert_eq!(h, *b);
    }

    #[test]
    fn forgotten_behavior_stays_registered() {
        let sched = seeded();
        let log = new_log();
        let weak = sched.spawn(Recorder { log: log.clone() }).downgrade();

        assert!(weak.upgrade().is_some(), "the registry keeps it alive");
        assert_eq!(sched.len(), 1);
        let snap = sched.snapshot();
        assert_eq!(snap.len(), 1);
        assert!(snap[0].is_registered());

        assert!(snap[0].destroy());
        assert_eq!(hooks_of(&log), vec!["start", "enable", "disable", "destroy"]);
        assert!(sched.is_empty());
        drop(snap);
        assert!(weak.upgrade().is_none(), "released once destroyed and unheld");
    }

    #[test]
    fn behavior_outlives_its_scheduler() {
        let b = seeded().spawn(Ticker);
        assert!(b.scheduler().is_none());
        assert!(!b.is_registered());
        b.set_weight(4);
        b.update(16.0);
        assert!(b.destroy());
        assert_eq!(b.accumulated_time(), 16.0);
    }

    #[test]
    fn script_state_is_reachable() {
        struct Counter {
            n: u32,
        }
        impl Script for Counter {
            const HOOKS: HookSet = HookSet::UPDATE;
            fn on_update(&mut self, _this: &BehaviorRef, _delta_ms: f64) {
                self.n += 1;
            }
        }

        let sched = seeded();
        let c = sched.spawn(Counter { n: 0 });
        c.update(1.0);
        c.update(1.0);
        assert_eq!(c.script().n, 2);
        c.script_mut().n = 0;
        assert_eq!(c.script().n, 0);
    }
}
