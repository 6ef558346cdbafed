//! Plain data row types written by trace backends.

use fb_behavior::BehaviorRef;
use fb_core::BehaviorId;

/// One behavior's state right after its update step in a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceRow {
    pub frame:               u64,
    pub behavior_id:         BehaviorId,
    pub weight:              i64,
    pub accumulated_time_ms: f64,
    /// `false` if the behavior disabled or destroyed itself during the update.
    pub enabled:             bool,
}

impl TraceRow {
    pub fn capture(frame: u64, behavior: &BehaviorRef) -> Self {
        Self {
            frame,
            behavior_id:         behavior.id(),
            weight:              behavior.weight(),
            accumulated_time_ms: behavior.accumulated_time(),
            enabled:             behavior.enabled(),
        }
    }
}
