//! The demo's behavior scripts.

use std::f64::consts::TAU;

use fb_behavior::{BehaviorRef, HookSet, Script, WeakBehaviorRef};
use tracing::{info, warn};

// ── Planet ────────────────────────────────────────────────────────────────────

/// Circles at a fixed angular speed and reports each full revolution.
pub struct Planet {
    pub name:          &'static str,
    /// Radians per second.
    pub angular_speed: f64,
    pub angle:         f64,
    pub revolutions:   u32,
}

impl Planet {
    pub fn new(name: &'static str, period_secs: f64) -> Self {
        Self { name, angular_speed: TAU / period_secs, angle: 0.0, revolutions: 0 }
    }
}

impl Script for Planet {
    const HOOKS: HookSet = HookSet::UPDATE
        .union(HookSet::DISABLE)
        .union(HookSet::ENABLE)
        .union(HookSet::RESTORE);

    fn on_update(&mut self, this: &BehaviorRef, delta_ms: f64) {
        self.angle += self.angular_speed * delta_ms / 1_000.0;
        while self.angle >= TAU {
            self.angle -= TAU;
            self.revolutions += 1;
            info!(planet = self.name, revolutions = self.revolutions, t_ms = this.accumulated_time(), "revolution");
        }
    }

    fn on_enable(&mut self, this: &BehaviorRef) {
        info!(planet = self.name, weight = this.weight(), "in view");
    }

    fn on_disable(&mut self, _this: &BehaviorRef) {
        info!(planet = self.name, angle = self.angle, "eclipsed");
    }

    fn on_restore(&mut self, _this: &BehaviorRef) {
        self.angle = 0.0;
    }
}

// ── Comet ─────────────────────────────────────────────────────────────────────

/// Streaks through for `lifetime_ms`, then destroys itself.
pub struct Comet {
    pub lifetime_ms: f64,
}

impl Script for Comet {
    const HOOKS: HookSet = HookSet::START
        .union(HookSet::UPDATE)
        .union(HookSet::DESTROY);

    fn on_start(&mut self, this: &BehaviorRef) {
        info!(id = %this.id(), lifetime_ms = self.lifetime_ms, "comet sighted");
    }

    fn on_update(&mut self, this: &BehaviorRef, _delta_ms: f64) {
        if this.accumulated_time() >= self.lifetime_ms {
            this.destroy();
        }
    }

    fn on_destroy(&mut self, this: &BehaviorRef) {
        info!(id = %this.id(), t_ms = this.accumulated_time(), "comet gone");
    }
}

// ── Observatory ───────────────────────────────────────────────────────────────

/// Runs first each frame: eclipses and restores a planet on a fixed period,
/// and launches a comet once.
pub struct Observatory {
    pub target:       WeakBehaviorRef,
    pub eclipse_ms:   f64,
    pub comet_at_ms:  f64,
    pub comet_weight: i64,
    since_toggle:     f64,
    comet_launched:   bool,
}

impl Observatory {
    pub fn new(target: WeakBehaviorRef, eclipse_ms: f64, comet_at_ms: f64, comet_weight: i64) -> Self {
        Self {
            target,
            eclipse_ms,
            comet_at_ms,
            comet_weight,
            since_toggle:   0.0,
            comet_launched: false,
        }
    }
}

impl Script for Observatory {
    const HOOKS: HookSet = HookSet::UPDATE;

    fn on_update(&mut self, this: &BehaviorRef, delta_ms: f64) {
        self.since_toggle += delta_ms;
        if self.since_toggle >= self.eclipse_ms {
            self.since_toggle = 0.0;
            if let Some(planet) = self.target.upgrade() {
                let visible = planet.enabled();
                if !visible {
                    planet.restore();
                }
                planet.set_enabled(!visible);
            }
        }

        if self.comet_launched || this.accumulated_time() < self.comet_at_ms {
            return;
        }
        let Some(scheduler) = this.scheduler() else { return };
        self.comet_launched = true;
        // The registry keeps the comet alive until it destroys itself.
        if let Err(e) = scheduler
            .builder(Comet { lifetime_ms: self.eclipse_ms })
            .weight(self.comet_weight)
            .spawn()
        {
            warn!(error = %e, "comet launch failed");
        }
    }
}
