//! Scheduler configuration.
//!
//! Typically embedded in an application-level config loaded from a TOML/JSON
//! file (enable the `serde` feature) and passed to `Scheduler::with_config`.

use crate::{FbError, FbResult, NOMINAL_FRAME_MS};

/// When a weight write triggers a registry re-sort.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResortPolicy {
    /// Re-sort whenever an update-capable behavior's weight changes, even if
    /// it is currently disabled and therefore not a registry member.
    #[default]
    Always,
    /// Re-sort only when the behavior is currently a registry member.
    MembersOnly,
}

/// Top-level scheduler configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Frame interval a self-paced host aims for.  Default: 64 ms.
    pub nominal_frame_ms: u64,

    /// Re-sort trigger for weight writes.  Default: [`ResortPolicy::Always`].
    pub resort_policy: ResortPolicy,

    /// Seed for behavior ids.  `None` seeds from OS entropy; `Some` makes the
    /// id sequence reproducible.
    pub id_seed: Option<u64>,

    /// Initial registry capacity.
    pub registry_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            nominal_frame_ms:  NOMINAL_FRAME_MS,
            resort_policy:     ResortPolicy::Always,
            id_seed:           None,
            registry_capacity: 64,
        }
    }
}

impl SchedulerConfig {
    /// Reject values no host could honour.
    pub fn validate(&self) -> FbResult<()> {
        if self.nominal_frame_ms == 0 {
            return Err(FbError::Config("nominal_frame_ms must be > 0".into()));
        }
        Ok(())
    }

    /// The nominal frame interval as a `Duration`.
    #[inline]
    pub fn nominal_frame(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.nominal_frame_ms)
    }
}
