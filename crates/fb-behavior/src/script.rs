//! The `Script` trait — the main extension point for user code.

use crate::{BehaviorRef, HookSet};

/// Pluggable behavior logic.
///
/// A script is the concrete part of a behavior: its own state plus whichever
/// lifecycle hooks it declares in [`HOOKS`][Self::HOOKS].  The lifecycle
/// itself (enablement, weight, accumulated time, registry membership) is
/// owned by the surrounding [`Behavior`][crate::Behavior] and reached through
/// the `this` handle every hook receives.
///
/// # Declared hooks
///
/// Every hook has an empty default body.  Only hooks named in `HOOKS` are
/// ever called; overriding a method without declaring it has no effect.
/// Declaring [`HookSet::UPDATE`] is what puts a behavior on the tick
/// registry.
///
/// # Re-entrancy
///
/// A hook may freely mutate its own behavior through `this` (`set_weight`,
/// `set_enabled`, `destroy`, …) or any other behavior.  State changes apply
/// immediately.  Hooks that such a call triggers on the *same* behavior
/// cannot run while this one holds `&mut self`; they are queued and run in
/// order as soon as the current hook returns.
///
/// # Example
///
/// ```rust,ignore
/// struct Blink { period_ms: f64 }
///
/// impl Script for Blink {
///     const HOOKS: HookSet = HookSet::UPDATE;
///
///     fn on_update(&mut self, this: &BehaviorRef, _delta_ms: f64) {
///         if this.accumulated_time() >= self.period_ms {
///             this.destroy();
///         }
///     }
/// }
/// ```
pub trait Script: 'static {
    /// The hooks this script implements.
    const HOOKS: HookSet;

    /// Called once during construction, before the first enable.
    /// `this.enabled()` is `false` here.
    fn on_start(&mut self, _this: &BehaviorRef) {}

    /// Called by the tick driver once per frame while registered.
    fn on_update(&mut self, _this: &BehaviorRef, _delta_ms: f64) {}

    /// Called after every enable, including the first.  Registry membership
    /// is already established.
    fn on_enable(&mut self, _this: &BehaviorRef) {}

    fn on_disable(&mut self, _this: &BehaviorRef) {}

    /// Subtype-defined reset.  The lifecycle touches nothing else.
    fn on_restore(&mut self, _this: &BehaviorRef) {}

    /// Called once, at the end of a successful `destroy()`.
    fn on_destroy(&mut self, _this: &BehaviorRef) {}
}
